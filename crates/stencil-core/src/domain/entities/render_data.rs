use serde::Serialize;
use serde_json::Value;

/// Variables visible to a template during one render call.
///
/// | Variable      | Present when                                   |
/// |---------------|------------------------------------------------|
/// | `Content`     | always: the file's buffered content            |
/// | `frontmatter` | front matter is enabled and the file has some  |
/// | `data`        | the renderer was configured with user data     |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderData {
    #[serde(rename = "Content")]
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RenderData {
    /// Content is decoded as UTF-8; invalid sequences are replaced.
    pub fn new(chunk: &[u8]) -> Self {
        Self {
            content: String::from_utf8_lossy(chunk).into_owned(),
            frontmatter: None,
            data: None,
        }
    }

    pub fn front_matter(mut self, front_matter: Option<Value>) -> Self {
        self.frontmatter = front_matter;
        self
    }

    pub fn user_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }
}
