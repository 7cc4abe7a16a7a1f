mod common;
mod lesson;
mod order;

pub use self::{common::*, lesson::*, order::*};
