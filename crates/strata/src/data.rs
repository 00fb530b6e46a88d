//! Index-linked FIFO lists sharing one pool of items.
//!
//! Every item (a `usize` handle) belongs to at most one list at a time. Enqueueing an item that
//! is already linked moves it to the tail of the target list, so a caller can re-bucket items
//! without first looking up where they currently live.

use std::fmt;

#[derive(Debug, Clone, Copy, Default)]
struct Link {
    list: Option<usize>,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Ends {
    head: Option<usize>,
    tail: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct BucketList {
    lists: Vec<Ends>,
    links: Vec<Link>,
}

impl BucketList {
    pub fn new(lists: usize, items: usize) -> Self {
        Self {
            lists: vec![Ends::default(); lists],
            links: vec![Link::default(); items],
        }
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Appends an empty list and returns its index.
    pub fn add_list(&mut self) -> usize {
        self.lists.push(Ends::default());
        self.lists.len() - 1
    }

    fn grow(&mut self, item: usize) {
        if item >= self.links.len() {
            self.links.resize(item + 1, Link::default());
        }
    }

    /// Appends `item` to `list`, unlinking it from wherever it was.
    pub fn enqueue(&mut self, list: usize, item: usize) {
        self.grow(item);
        self.unlink(item);
        let ends = &mut self.lists[list];
        let prev = ends.tail;
        ends.tail = Some(item);
        if ends.head.is_none() {
            ends.head = Some(item);
        }
        if let Some(prev) = prev {
            self.links[prev].next = Some(item);
        }
        self.links[item] = Link {
            list: Some(list),
            prev,
            next: None,
        };
    }

    /// Unlinks and returns the oldest item of `list`.
    pub fn dequeue(&mut self, list: usize) -> Option<usize> {
        let item = self.lists[list].head?;
        self.unlink(item);
        Some(item)
    }

    /// Detaches `item` from its list, if any.
    pub fn unlink(&mut self, item: usize) {
        let Some(link) = self.links.get(item).copied() else {
            return;
        };
        let Some(list) = link.list else {
            return;
        };
        match link.prev {
            Some(p) => self.links[p].next = link.next,
            None => self.lists[list].head = link.next,
        }
        match link.next {
            Some(n) => self.links[n].prev = link.prev,
            None => self.lists[list].tail = link.prev,
        }
        self.links[item] = Link::default();
    }

    pub fn list_of(&self, item: usize) -> Option<usize> {
        self.links.get(item).and_then(|l| l.list)
    }

    pub fn is_empty(&self, list: usize) -> bool {
        self.lists[list].head.is_none()
    }

    /// Items of `list` from oldest to newest.
    pub fn iter(&self, list: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.lists[list].head, |&item| self.links[item].next)
    }

    /// Renders `list` as `[a, b, ...]` using `show` for each item.
    pub fn display<'a, F>(&'a self, list: usize, show: F) -> impl fmt::Display + 'a
    where
        F: Fn(usize) -> String + 'a,
    {
        struct Render<'a, F> {
            lists: &'a BucketList,
            list: usize,
            show: F,
        }

        impl<F: Fn(usize) -> String> fmt::Display for Render<'_, F> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let parts: Vec<String> = self.lists.iter(self.list).map(&self.show).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }

        Render {
            lists: self,
            list,
            show,
        }
    }
}
