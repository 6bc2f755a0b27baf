// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The result store: one reactive cell holding the current result set.
//!
//! Written only by the dispatcher (and the clear button), read by the
//! renderer. Each write bumps the [`Generation`] and then notifies subscribers
//! synchronously, after the borrow is released, so a subscriber may read the
//! store (or even write it) from inside its callback.

use crate::types::{Generation, ResultSet};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Subscriber = Box<dyn Fn()>;

/// Last-write-wins cell of `Option<Rc<ResultSet<H>>>`.
pub struct ResultStore<H> {
    current: RefCell<Option<Rc<ResultSet<H>>>>,
    generation: Cell<Generation>,
    subscribers: RefCell<Vec<Rc<Subscriber>>>,
}

impl<H> Default for ResultStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ResultStore<H> {
    pub fn new() -> Self {
        Self {
            current: RefCell::new(None),
            generation: Cell::new(Generation::INITIAL),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// The current result set, if any.
    pub fn current(&self) -> Option<Rc<ResultSet<H>>> {
        self.current.borrow().clone()
    }

    /// Generation of the latest write.
    pub fn generation(&self) -> Generation {
        self.generation.get()
    }

    /// Whether `generation` is still the latest write.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation.get() == generation
    }

    /// Replace the current set with `hits`. Returns the new set.
    pub fn set(&self, hits: Vec<H>) -> Rc<ResultSet<H>> {
        let generation = self.advance();
        let set = Rc::new(ResultSet::new(generation, hits));
        *self.current.borrow_mut() = Some(set.clone());
        self.notify();
        set
    }

    /// Drop the current set ("no results").
    pub fn clear(&self) {
        self.advance();
        *self.current.borrow_mut() = None;
        self.notify();
    }

    /// Register a callback run after every write.
    pub fn subscribe(&self, subscriber: impl Fn() + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(Box::new(subscriber)));
    }

    fn advance(&self) -> Generation {
        let next = self.generation.get().next();
        self.generation.set(next);
        next
    }

    fn notify(&self) {
        // Snapshot so callbacks can subscribe or write without a double borrow
        let subscribers: Vec<Rc<Subscriber>> = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber();
        }
    }
}
