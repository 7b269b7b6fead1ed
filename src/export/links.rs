//! Previous/next navigation over an ordered list.

use crate::error::{Result, RpglogError};

/// One item together with its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<'a, T> {
    /// The item before `current`; `None` only for the first item
    pub previous: Option<&'a T>,
    /// The item itself
    pub current: &'a T,
    /// The item after `current`; `None` only for the last item
    pub next: Option<&'a T>,
}

/// Builds the navigation triple of every item, in order.
///
/// A single item has no neighbours at all. An empty list is an error, since
/// there is nothing to navigate.
///
/// ```
/// use rpglog::export::links::links;
///
/// let pages = ["a.html", "b.html", "c.html"];
/// let nav = links(&pages)?;
/// assert_eq!(nav[1].previous, Some(&"a.html"));
/// assert_eq!(nav[1].next, Some(&"c.html"));
/// assert_eq!(nav[2].next, None);
/// # Ok::<(), rpglog::RpglogError>(())
/// ```
pub fn links<T>(items: &[T]) -> Result<Vec<Link<'_, T>>> {
    if items.is_empty() {
        return Err(RpglogError::EmptyNavigation);
    }

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, current)| Link {
            previous: index.checked_sub(1).map(|i| &items[i]),
            current,
            next: items.get(index + 1),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_error() {
        let items: [u8; 0] = [];
        assert!(matches!(links(&items), Err(RpglogError::EmptyNavigation)));
    }

    #[test]
    fn test_single_item_has_no_neighbours() {
        let nav = links(&["only"]).unwrap();
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].previous, None);
        assert_eq!(nav[0].current, &"only");
        assert_eq!(nav[0].next, None);
    }

    #[test]
    fn test_two_items() {
        let nav = links(&[1, 2]).unwrap();
        assert_eq!((nav[0].previous, nav[0].next), (None, Some(&2)));
        assert_eq!((nav[1].previous, nav[1].next), (Some(&1), None));
    }

    #[test]
    fn test_interior_items_have_both() {
        let items: Vec<u32> = (0..5).collect();
        let nav = links(&items).unwrap();
        for (i, link) in nav.iter().enumerate().skip(1).take(3) {
            assert_eq!(*link.current, items[i]);
            assert_eq!(link.previous, Some(&items[i - 1]));
            assert_eq!(link.next, Some(&items[i + 1]));
        }
    }
}
