use crate::entry::Entry;
use crate::treap::node::Node;
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt::{self, Display, Write};
use std::mem;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

enum RemovalCase {
    RotateLeft,
    RotateRight,
    Splice,
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Option<U>
where
    T: Ord,
{
    match *tree {
        Some(ref mut node) => {
            let ret;
            match new_node.entry.key.cmp(&node.entry.key) {
                Ordering::Less => {
                    ret = insert(&mut node.left, new_node);
                    if node.is_heap_property_violated(&node.left) {
                        trace!("rotating right below priority {}", node.priority);
                        node.rotate_right();
                    }
                },
                Ordering::Greater => {
                    ret = insert(&mut node.right, new_node);
                    if node.is_heap_property_violated(&node.right) {
                        trace!("rotating left below priority {}", node.priority);
                        node.rotate_left();
                    }
                },
                Ordering::Equal => {
                    let Node {
                        entry: Entry { value, .. },
                        ..
                    } = new_node;
                    ret = Some(mem::replace(&mut node.entry.value, value));
                },
            }
            ret
        },
        None => {
            *tree = Some(Box::new(new_node));
            None
        },
    }
}

fn get_removal_case<T, U>(node: &Node<T, U>) -> RemovalCase {
    match (&node.left, &node.right) {
        (Some(left_node), Some(right_node)) => {
            if right_node.priority < left_node.priority {
                RemovalCase::RotateLeft
            } else {
                RemovalCase::RotateRight
            }
        },
        _ => RemovalCase::Splice,
    }
}

fn rotate_down<T, U>(tree: &mut Tree<T, U>) -> Option<Entry<T, U>> {
    let case = tree.as_ref().map(|node| get_removal_case(node))?;
    match case {
        RemovalCase::RotateLeft => tree.as_mut().and_then(|node| {
            trace!("rotating left to push down priority {}", node.priority);
            node.rotate_left();
            rotate_down(&mut node.left)
        }),
        RemovalCase::RotateRight => tree.as_mut().and_then(|node| {
            trace!("rotating right to push down priority {}", node.priority);
            node.rotate_right();
            rotate_down(&mut node.right)
        }),
        RemovalCase::Splice => tree.take().map(|node| {
            let Node {
                entry, left, right, ..
            } = *node;
            *tree = left.or(right);
            entry
        }),
    }
}

pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ordering = tree.as_ref().map(|node| key.cmp(node.entry.key.borrow()))?;
    match ordering {
        Ordering::Less => tree.as_mut().and_then(|node| remove(&mut node.left, key)),
        Ordering::Greater => tree.as_mut().and_then(|node| remove(&mut node.right, key)),
        Ordering::Equal => rotate_down(tree),
    }
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_mut().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => get_mut(&mut node.left, key),
        Ordering::Greater => get_mut(&mut node.right, key),
        Ordering::Equal => Some(&mut node.entry),
    })
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

pub fn height<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        Some(node) => 1 + cmp::max(height(&node.left), height(&node.right)),
        None => 0,
    }
}

pub fn stringify<T, U, W>(tree: &Tree<T, U>, out: &mut W) -> fmt::Result
where
    T: Display,
    U: Display,
    W: Write,
{
    if let Some(node) = tree {
        write!(out, "{{{} , {}}}(", node.entry.key, node.entry.value)?;
        stringify(&node.left, out)?;
        out.write_str(")(")?;
        stringify(&node.right, out)?;
        out.write_char(')')?;
    }
    Ok(())
}

pub fn is_heap<T, U>(tree: &Tree<T, U>) -> bool {
    match tree {
        Some(node) => {
            !node.is_heap_property_violated(&node.left)
                && !node.is_heap_property_violated(&node.right)
                && is_heap(&node.left)
                && is_heap(&node.right)
        },
        None => true,
    }
}

// Every entry must lie strictly between the closest ancestors it hangs to the right and left of.
pub fn is_bst<T, U>(
    tree: &Tree<T, U>,
    lower: Option<&Entry<T, U>>,
    upper: Option<&Entry<T, U>>,
) -> bool
where
    T: Ord,
{
    match tree {
        Some(node) => {
            let entry = &node.entry;
            lower.map_or(true, |lower| lower < entry)
                && upper.map_or(true, |upper| entry < upper)
                && is_bst(&node.left, lower, Some(entry))
                && is_bst(&node.right, Some(entry), upper)
        },
        None => true,
    }
}
