//! Direct-construction PDF object model
//!
//! Plain values for authoring PDF content. [`Object::write_pdf`] serializes
//! them to bytes; [`SyntaxWriter`](crate::writer::SyntaxWriter) turns them
//! into green trees with the same text.

mod array;
mod dictionary;
pub(crate) mod encoding;
mod primitive;
mod stream;

pub use array::Array;
pub use dictionary::Dictionary;
pub use primitive::{Object, ObjectId};
pub use stream::Stream;
