//! Document: the root of the model

use std::path::{Path, PathBuf};

use crate::spreadsheet::Spreadsheet;

/// Family of an office document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Not yet determined
    #[default]
    None,
    /// Workbook of sheets
    Spreadsheet,
    /// Word-processing document
    Text,
    /// Slide deck
    Presentation,
}

/// Placeholder body for text documents, which carry no content yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBody;

/// Placeholder body for presentations, which carry no content yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationBody;

/// Body of a document, matching its [`DocumentKind`]
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DocumentBody {
    #[default]
    None,
    Spreadsheet(Spreadsheet),
    Text(TextBody),
    Presentation(PresentationBody),
}

impl DocumentBody {
    /// A fresh, empty body for `kind`
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::None => DocumentBody::None,
            DocumentKind::Spreadsheet => DocumentBody::Spreadsheet(Spreadsheet::new()),
            DocumentKind::Text => DocumentBody::Text(TextBody),
            DocumentKind::Presentation => DocumentBody::Presentation(PresentationBody),
        }
    }

    /// Kind of this body
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentBody::None => DocumentKind::None,
            DocumentBody::Spreadsheet(_) => DocumentKind::Spreadsheet,
            DocumentBody::Text(_) => DocumentKind::Text,
            DocumentBody::Presentation(_) => DocumentKind::Presentation,
        }
    }
}

/// An office document.
///
/// The kind and the body always agree: changing the kind replaces the body.
///
/// # Example
///
/// ```rust
/// use officepack_core::{Document, DocumentKind, Sheet};
///
/// let mut doc = Document::with_kind(DocumentKind::Spreadsheet);
/// let spreadsheet = doc.spreadsheet_mut().unwrap();
/// spreadsheet.workbook_mut().add_sheet(&Sheet::new("Sheet1"));
/// spreadsheet.set_cell_text(0, 0, 0, "Hello");
///
/// assert_eq!(doc.spreadsheet().unwrap().cell_text(0, 0, 0), Some("Hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    path: Option<PathBuf>,
    body: DocumentBody,
}

impl Document {
    /// Create a document of kind [`DocumentKind::None`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with an empty body of `kind`
    pub fn with_kind(kind: DocumentKind) -> Self {
        Self {
            path: None,
            body: DocumentBody::for_kind(kind),
        }
    }

    /// Create a spreadsheet document from an existing body
    pub fn from_spreadsheet(spreadsheet: Spreadsheet) -> Self {
        Self {
            path: None,
            body: DocumentBody::Spreadsheet(spreadsheet),
        }
    }

    /// Path the document was read from or last saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record where the document lives
    pub fn set_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.path = Some(path.into());
    }

    /// Kind of the current body
    pub fn kind(&self) -> DocumentKind {
        self.body.kind()
    }

    /// Change the kind, replacing the body with an empty one.
    ///
    /// Setting the current kind again keeps the existing body.
    pub fn set_kind(&mut self, kind: DocumentKind) {
        if self.kind() != kind {
            self.body = DocumentBody::for_kind(kind);
        }
    }

    /// The body, whatever its kind
    pub fn body(&self) -> &DocumentBody {
        &self.body
    }

    /// The spreadsheet body, if this is a spreadsheet
    pub fn spreadsheet(&self) -> Option<&Spreadsheet> {
        match &self.body {
            DocumentBody::Spreadsheet(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable access to the spreadsheet body
    pub fn spreadsheet_mut(&mut self) -> Option<&mut Spreadsheet> {
        match &mut self.body {
            DocumentBody::Spreadsheet(s) => Some(s),
            _ => None,
        }
    }

    /// The text body, if this is a text document
    pub fn text_body(&self) -> Option<&TextBody> {
        match &self.body {
            DocumentBody::Text(t) => Some(t),
            _ => None,
        }
    }

    /// The presentation body, if this is a presentation
    pub fn presentation_body(&self) -> Option<&PresentationBody> {
        match &self.body {
            DocumentBody::Presentation(p) => Some(p),
            _ => None,
        }
    }
}
