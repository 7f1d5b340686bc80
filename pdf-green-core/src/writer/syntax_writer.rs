//! Object model to green tree
//!
//! [`SyntaxWriter`] spells objects as trees whose text is byte-for-byte what
//! [`Object::write_pdf`] emits, so a tree can stand in for serialized output
//! while keeping its structure navigable.

use super::xref::{subsections, XRefRecord};
use crate::error::{Result, SyntaxError};
use crate::objects::{Array, Dictionary, Object, ObjectId};
use crate::syntax::{
    CollectionExpressionSyntax, FileTrailerSyntax, GreenNode, GreenSyntax, IndirectObjectSyntax,
    SyntaxFactory, SyntaxKind, XRefSectionSyntax,
};

/// Builds green trees for objects through a [`SyntaxFactory`].
#[derive(Debug, Clone, Default)]
pub struct SyntaxWriter {
    factory: SyntaxFactory,
}

impl SyntaxWriter {
    pub fn new(factory: SyntaxFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &SyntaxFactory {
        &self.factory
    }

    /// Expression tree for `object`.
    ///
    /// Streams have no expression form and are rejected.
    pub fn literal(&self, object: &Object) -> Result<GreenNode> {
        self.expression(object, None)
    }

    pub fn array(&self, array: &Array) -> Result<CollectionExpressionSyntax> {
        self.array_with_leading(array, None)
    }

    pub fn dictionary(&self, dictionary: &Dictionary) -> Result<CollectionExpressionSyntax> {
        self.dictionary_with_leading(dictionary, None)
    }

    /// `n g obj`, the content and `endobj`, each on its own line.
    pub fn indirect_object(&self, id: ObjectId, object: &Object) -> Result<IndirectObjectSyntax> {
        let f = &self.factory;
        let header = f.indirect_object_header(
            f.integer(i64::from(id.number()), None, Some(self.space()))?,
            f.integer(i64::from(id.generation()), None, Some(self.space()))?,
            f.keyword(SyntaxKind::ObjKeyword, None, Some(self.eol()))?,
        )?;
        let content = self.expression(object, None)?;
        let endobj = f.keyword(SyntaxKind::EndObjKeyword, Some(self.eol()), Some(self.eol()))?;
        f.indirect_object(header, content, endobj)
    }

    /// `xref` section for `records` plus the free-list head.
    pub fn xref_section(&self, records: &[XRefRecord]) -> Result<XRefSectionSyntax> {
        let f = &self.factory;
        let groups = subsections(records)?;
        tracing::debug!(
            records = records.len(),
            subsections = groups.len(),
            "building xref section tree"
        );

        let mut subsection_list = f.list_builder();
        for (start, lines) in &groups {
            let mut entries = f.list_builder();
            for line in lines {
                entries.add(
                    f.xref_entry_from_values(line.offset, line.generation, line.in_use)?
                        .into_green(),
                );
            }
            let subsection = f.xref_subsection(
                f.integer(i64::from(*start), None, Some(self.space()))?,
                f.integer(lines.len() as i64, None, Some(self.eol()))?,
                entries.to_list(),
            )?;
            subsection_list.add(subsection.into_green());
        }

        f.xref_section(
            f.keyword(SyntaxKind::XRefKeyword, None, Some(self.eol()))?,
            subsection_list.to_list(),
        )
    }

    /// `trailer`, the dictionary, `startxref`, the offset and `%%EOF`.
    pub fn trailer(&self, trailer: &Dictionary, startxref: u64) -> Result<FileTrailerSyntax> {
        let f = &self.factory;

        let mut eof = f.list_builder();
        eof.add(self.eol());
        eof.add(f.comment("%%EOF"));
        eof.add(self.eol());

        let offset = i64::try_from(startxref).map_err(|_| SyntaxError::ArgumentOutOfRange {
            param: "startxref",
            value: startxref,
            limit: i64::MAX as u64,
        })?;

        f.file_trailer(
            f.keyword(SyntaxKind::TrailerKeyword, None, Some(self.eol()))?,
            self.dictionary_with_leading(trailer, None)?,
            f.keyword(SyntaxKind::StartXRefKeyword, Some(self.eol()), Some(self.eol()))?,
            f.integer(offset, None, eof.to_list_node())?,
        )
    }

    fn space(&self) -> GreenNode {
        self.factory.whitespace(" ")
    }

    fn eol(&self) -> GreenNode {
        self.factory.end_of_line("\n")
    }

    fn expression(&self, object: &Object, leading: Option<GreenNode>) -> Result<GreenNode> {
        let f = &self.factory;
        let token = match object {
            Object::Null => f.keyword(SyntaxKind::NullKeyword, leading, None)?,
            Object::Boolean(true) => f.keyword(SyntaxKind::TrueKeyword, leading, None)?,
            Object::Boolean(false) => f.keyword(SyntaxKind::FalseKeyword, leading, None)?,
            Object::Integer(i) => f.integer(*i, leading, None)?,
            Object::Real(r) => f.real(*r, leading, None)?,
            Object::String(bytes) => f.literal_string(bytes, leading, None)?,
            Object::HexString(bytes) => f.hex_string(bytes, leading, None)?,
            Object::Name(name) => f.name(name, leading, None)?,
            Object::Reference(id) => {
                let reference = f.indirect_reference(
                    f.integer(i64::from(id.number()), leading, Some(self.space()))?,
                    f.integer(i64::from(id.generation()), None, Some(self.space()))?,
                    f.keyword(SyntaxKind::ReferenceKeyword, None, None)?,
                )?;
                return Ok(reference.into_green());
            }
            Object::Array(array) => {
                return Ok(self.array_with_leading(array, leading)?.into_green());
            }
            Object::Dictionary(dictionary) => {
                return Ok(self.dictionary_with_leading(dictionary, leading)?.into_green());
            }
            Object::Stream(_) => {
                return Err(SyntaxError::UnexpectedKind {
                    param: "object",
                    expected: "object with an expression form".to_string(),
                    found: "Stream".to_string(),
                });
            }
        };
        Ok(f.literal(token)?.into_green())
    }

    fn array_with_leading(
        &self,
        array: &Array,
        leading: Option<GreenNode>,
    ) -> Result<CollectionExpressionSyntax> {
        let f = &self.factory;
        let mut elements = f.list_builder();
        for (i, object) in array.iter().enumerate() {
            let leading = (i > 0).then(|| self.space());
            elements.add(f.array_element(self.expression(object, leading)?)?.into_green());
        }

        f.array_expression(
            f.keyword(SyntaxKind::OpenBracketToken, leading, None)?,
            elements.to_list(),
            f.keyword(SyntaxKind::CloseBracketToken, None, None)?,
        )
    }

    fn dictionary_with_leading(
        &self,
        dictionary: &Dictionary,
        leading: Option<GreenNode>,
    ) -> Result<CollectionExpressionSyntax> {
        let f = &self.factory;
        let mut elements = f.list_builder();
        for (i, (key, value)) in dictionary.entries().enumerate() {
            let key_leading = (i > 0).then(|| self.space());
            let key = f.literal(f.name(key, key_leading, None)?)?;
            let value = self.expression(value, Some(self.space()))?;
            elements.add(f.dictionary_element(key, value)?.into_green());
        }

        f.dictionary_expression(
            f.keyword(SyntaxKind::LessThanLessThanToken, leading, None)?,
            elements.to_list(),
            f.keyword(SyntaxKind::GreaterThanGreaterThanToken, None, None)?,
        )
    }
}
