/// Errors that can occur while reading or parsing NFO descriptors.
#[derive(Debug, thiserror::Error)]
pub enum NfoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid NFO descriptor: {0}")]
    InvalidNfo(String),

    #[error("Failed to read descriptor {path}: {message}")]
    Read { path: String, message: String },

    #[error("Bootstrap cancelled")]
    Cancelled,
}

impl NfoError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidNfo(msg.into())
    }

    pub fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }
}
