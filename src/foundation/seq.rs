//! Small iterator adapters shared by trajectory and light program consumers.
//!
//! Both adapters are lazy and only pull from the source when polled. They are `Clone` whenever the
//! source iterator (and predicates) are, so a pass over a materialized slice can be restarted by
//! cloning the adapter before consuming it.

use std::iter::Fuse;

/// Iterate over adjacent `(previous, current)` pairs of `items`.
///
/// A source of length `n` yields `n - 1` pairs; sources of length 0 or 1 yield nothing.
pub fn iter_pairs<I>(items: I) -> Pairs<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Pairs {
        iter: items.into_iter().fuse(),
        prev: None,
    }
}

/// Iterator returned by [`iter_pairs`].
pub struct Pairs<I: Iterator> {
    iter: Fuse<I>,
    prev: Option<I::Item>,
}

impl<I> Clone for Pairs<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            prev: self.prev.clone(),
        }
    }
}

impl<I> Iterator for Pairs<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = (I::Item, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        if self.prev.is_none() {
            self.prev = Some(self.iter.next()?);
        }
        let cur = self.iter.next()?;
        let prev = self.prev.replace(cur.clone())?;
        Some((prev, cur))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        if self.prev.is_some() {
            (lo, hi)
        } else {
            (lo.saturating_sub(1), hi.map(|h| h.saturating_sub(1)))
        }
    }
}

/// Yield the run of `items` that begins at the first element matching `start` and ends, exclusive,
/// at the first element from there on matching `stop`.
///
/// Predicate evaluation order is part of the contract: `start` sees every element up to and
/// including its first match and nothing after it; `stop` sees the element that matched `start`
/// and every following element until it first matches. Nothing is pulled from the source once
/// `stop` has matched. Passing the same predicate twice therefore yields an empty run.
pub fn slice<I, S, E>(items: I, start: S, stop: E) -> Slice<I::IntoIter, S, E>
where
    I: IntoIterator,
    S: FnMut(&I::Item) -> bool,
    E: FnMut(&I::Item) -> bool,
{
    Slice {
        iter: items.into_iter(),
        start,
        stop,
        state: SliceState::Seeking,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SliceState {
    Seeking,
    Yielding,
    Done,
}

/// Iterator returned by [`slice`].
#[derive(Clone, Debug)]
pub struct Slice<I, S, E> {
    iter: I,
    start: S,
    stop: E,
    state: SliceState,
}

impl<I, S, E> Iterator for Slice<I, S, E>
where
    I: Iterator,
    S: FnMut(&I::Item) -> bool,
    E: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                SliceState::Done => return None,
                SliceState::Seeking => {
                    let Some(item) = self.iter.next() else {
                        self.state = SliceState::Done;
                        return None;
                    };
                    if !(self.start)(&item) {
                        continue;
                    }
                    self.state = SliceState::Yielding;
                    return self.emit_unless_stop(item);
                }
                SliceState::Yielding => {
                    let Some(item) = self.iter.next() else {
                        self.state = SliceState::Done;
                        return None;
                    };
                    return self.emit_unless_stop(item);
                }
            }
        }
    }
}

impl<I, S, E> Slice<I, S, E>
where
    I: Iterator,
    E: FnMut(&I::Item) -> bool,
{
    fn emit_unless_stop(&mut self, item: I::Item) -> Option<I::Item> {
        if (self.stop)(&item) {
            self.state = SliceState::Done;
            None
        } else {
            Some(item)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/seq.rs"]
mod tests;
