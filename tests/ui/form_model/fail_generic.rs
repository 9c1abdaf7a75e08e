#![allow(dead_code)]

use formstate::form::FormModel;

#[derive(Clone, FormModel)]
pub struct Wrapper<T> {
    pub value: T,
}

fn main() {}
