use crate::board::{Column, Queens};

#[derive(Debug, Clone)]
pub struct Trace {
    pub root: Queens,
    pub events: Vec<Event>,
}

impl Trace {
    #[must_use]
    pub const fn new(root: Queens) -> Self {
        Self { root, events: vec![] }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Place {
        row: usize,
        from: Option<Column>,
        to: Column,

        queens: Queens,
    },
    Remove {
        row: usize,

        queens: Queens,
    },
    Set {
        queens: Queens,
    },
    Solved {
        queens: Queens,
    },
}
