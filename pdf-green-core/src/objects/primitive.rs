use super::encoding::{encode_hex_string, encode_literal_string, encode_name, format_real};
use crate::error::Result;
use crate::objects::{Array, Dictionary, Stream};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(Vec<u8>),
    HexString(Vec<u8>),
    Name(String),
    Array(Array),
    Dictionary(Dictionary),
    Stream(Stream),
    Reference(ObjectId),
}

impl Object {
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(f) => Some(*f),
            Object::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Bytes of a literal or hexadecimal string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) | Object::HexString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            Object::Stream(stream) => Some(stream.dictionary()),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// Serializes the object in PDF syntax.
    pub fn write_pdf<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Object::Null => out.write_all(b"null")?,
            Object::Boolean(b) => out.write_all(if *b { b"true" } else { b"false" })?,
            Object::Integer(i) => write!(out, "{i}")?,
            Object::Real(f) => out.write_all(format_real(*f).as_bytes())?,
            Object::String(s) => out.write_all(encode_literal_string(s).as_bytes())?,
            Object::HexString(s) => out.write_all(encode_hex_string(s).as_bytes())?,
            Object::Name(n) => out.write_all(encode_name(n).as_bytes())?,
            Object::Array(arr) => {
                out.write_all(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        out.write_all(b" ")?;
                    }
                    obj.write_pdf(out)?;
                }
                out.write_all(b"]")?;
            }
            Object::Dictionary(dict) => {
                out.write_all(b"<<")?;
                for (i, (key, value)) in dict.entries().enumerate() {
                    if i > 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(encode_name(key).as_bytes())?;
                    out.write_all(b" ")?;
                    value.write_pdf(out)?;
                }
                out.write_all(b">>")?;
            }
            Object::Stream(stream) => {
                Object::Dictionary(stream.dictionary().clone()).write_pdf(out)?;
                out.write_all(b"\nstream\n")?;
                out.write_all(stream.data())?;
                out.write_all(b"\nendstream")?;
            }
            Object::Reference(id) => write!(out, "{id}")?,
        }
        Ok(())
    }

    pub fn to_pdf_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_pdf(&mut bytes);
        bytes
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<f32> for Object {
    fn from(f: f32) -> Self {
        Object::Real(f as f64)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Real(f)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s.into_bytes())
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.as_bytes().to_vec())
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(Array::from(v))
    }
}

impl From<Array> for Object {
    fn from(a: Array) -> Self {
        Object::Array(a)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<Stream> for Object {
    fn from(s: Stream) -> Self {
        Object::Stream(s)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(object: &Object) -> String {
        String::from_utf8(object.to_pdf_bytes()).unwrap()
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId::new(12, 0).to_string(), "12 0 R");
        assert!(ObjectId::new(1, 5) < ObjectId::new(2, 0));
    }

    #[test]
    fn test_write_scalars() {
        assert_eq!(pdf(&Object::Null), "null");
        assert_eq!(pdf(&Object::from(true)), "true");
        assert_eq!(pdf(&Object::from(-42)), "-42");
        assert_eq!(pdf(&Object::from(3.5)), "3.5");
        assert_eq!(pdf(&Object::from("Hi (there)")), "(Hi \\(there\\))");
        assert_eq!(pdf(&Object::HexString(vec![0xDE, 0xAD])), "<DEAD>");
        assert_eq!(pdf(&Object::name("Type")), "/Type");
        assert_eq!(pdf(&Object::from(ObjectId::new(3, 0))), "3 0 R");
    }

    #[test]
    fn test_write_array() {
        let array: Array = vec![Object::from(1), Object::name("X"), Object::Null]
            .into_iter()
            .collect();
        assert_eq!(pdf(&Object::from(array)), "[1 /X null]");
        assert_eq!(pdf(&Object::from(Array::new())), "[]");
    }

    #[test]
    fn test_write_dictionary_keeps_order() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Example"));
        dict.set("SubType", Object::name("DictionaryExample"));
        assert_eq!(
            pdf(&Object::from(dict)),
            "<</Type /Example /SubType /DictionaryExample>>"
        );
    }

    #[test]
    fn test_write_stream() {
        let stream = Stream::new(b"BT ET".to_vec());
        assert_eq!(
            pdf(&Object::from(stream)),
            "<</Length 5>>\nstream\nBT ET\nendstream"
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Object::from(7).as_real(), Some(7.0));
        assert_eq!(Object::HexString(vec![1]).as_bytes(), Some(&[1u8][..]));
        assert_eq!(Object::from(ObjectId::new(4, 1)).as_reference(), Some(ObjectId::new(4, 1)));
        assert!(Object::Null.is_null());
        assert!(Object::from(Stream::new(Vec::new())).as_dict().is_some());
    }
}
