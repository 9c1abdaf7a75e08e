#![allow(dead_code)]

use formstate::form::FormModel;

#[derive(Clone, FormModel)]
pub enum Plan {
    Free,
    Pro { seats: String },
}

fn main() {}
