#![allow(dead_code)]

use formstate::form::FormModel;

#[derive(Clone, FormModel)]
pub struct Credentials(pub String, pub String);

fn main() {}
