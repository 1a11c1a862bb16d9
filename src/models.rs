use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A named container node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A stored image belonging to a folder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub folder_id: String,
    /// Object storage key, also used as `filename` when deleting
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Field a listing is ordered by
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "createdAt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::CreatedAt => "Created",
        }
    }

    pub fn next(&self) -> SortField {
        match self {
            SortField::Name => SortField::CreatedAt,
            SortField::CreatedAt => SortField::Name,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(&self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Listing order, sent as query parameters only
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOptions {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        SortOptions { field, direction }
    }

    pub fn with_next_field(self) -> Self {
        SortOptions {
            field: self.field.next(),
            ..self
        }
    }

    pub fn reversed(self) -> Self {
        SortOptions {
            direction: self.direction.reversed(),
            ..self
        }
    }

    pub fn describe(&self) -> String {
        format!("{} {}", self.field.label(), self.direction.arrow())
    }
}

/// Opaque continuation token (`lastKey`) returned by listing endpoints
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Cursor(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Null, absent or empty tokens mean the listing is exhausted. Structured
/// tokens are carried as their compact JSON text.
fn deserialize_cursor<'de, D>(deserializer: D) -> Result<Option<Cursor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(Cursor(s)),
        Some(other) => Some(Cursor(other.to_string())),
    })
}

/// Creation metadata is display-only: RFC 3339 text, `YYYY-MM-DD HH:MM:SS`
/// (taken as UTC) or epoch milliseconds. Anything else becomes `None`
/// rather than failing the whole page.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_timestamp(&s),
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Helper function to deserialize null as empty vector
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// One page of `GET /folders`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderPage {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub folders: Vec<Folder>,
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub last_key: Option<Cursor>,
}

/// One page of `GET /folders/{id}/images`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePage {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub images: Vec<Image>,
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub last_key: Option<Cursor>,
}

/// Response of `GET /files`; entries are passed through untyped
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FileListing {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub files: Vec<serde_json::Value>,
}

/// Body of `POST /folders`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderInput {
    pub name: String,
    pub parent_id: String,
}

/// Partial folder update; only present fields are sent
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl FolderUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        FolderUpdate {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none()
    }
}

/// Signed upload target handed out by the backend
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    pub upload_url: String,
    /// Storage key the object will live under
    pub filename: String,
}

/// Body of `POST /folders/{id}/images`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub key: String,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

/// Local file contents about to be uploaded
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageUpload {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_page_with_string_cursor() {
        let page: FolderPage = serde_json::from_str(
            r#"{"folders":[{"id":"f1","name":"Trips","parentId":"root","createdAt":"2024-05-01T10:00:00Z"}],"lastKey":"k1"}"#,
        )
        .unwrap();
        assert_eq!(page.folders.len(), 1);
        assert_eq!(page.folders[0].parent_id.as_deref(), Some("root"));
        assert!(page.folders[0].created_at.is_some());
        assert_eq!(page.last_key, Some(Cursor::new("k1")));
    }

    #[test]
    fn test_missing_null_and_empty_cursor_mean_exhausted() {
        for body in [
            r#"{"folders":[]}"#,
            r#"{"folders":[],"lastKey":null}"#,
            r#"{"folders":[],"lastKey":""}"#,
        ] {
            let page: FolderPage = serde_json::from_str(body).unwrap();
            assert_eq!(page.last_key, None, "body: {}", body);
        }
    }

    #[test]
    fn test_structured_cursor_kept_as_json_text() {
        let page: ImagePage =
            serde_json::from_str(r#"{"images":null,"lastKey":{"id":"i9","folderId":"f1"}}"#).unwrap();
        assert!(page.images.is_empty());
        assert_eq!(page.last_key, Some(Cursor::new(r#"{"id":"i9","folderId":"f1"}"#)));
    }

    #[test]
    fn test_odd_created_at_does_not_break_page() {
        let page: FolderPage = serde_json::from_str(
            r#"{"folders":[
                {"id":"f1","name":"A","createdAt":1714557600000},
                {"id":"f2","name":"B","createdAt":"2024-05-01 10:00:00"},
                {"id":"f3","name":"C","createdAt":"last tuesday"},
                {"id":"f4","name":"D","createdAt":null}
            ],"lastKey":"k1"}"#,
        )
        .unwrap();
        assert_eq!(page.folders.len(), 4);
        let expected = "2024-05-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(page.folders[0].created_at, Some(expected));
        assert_eq!(page.folders[1].created_at, Some(expected));
        assert_eq!(page.folders[2].created_at, None);
        assert_eq!(page.folders[3].created_at, None);
        assert_eq!(page.last_key, Some(Cursor::new("k1")));

        let image: Image = serde_json::from_str(
            r#"{"id":"i1","folderId":"f1","key":"k","name":"a.png","createdAt":{"seconds":1}}"#,
        )
        .unwrap();
        assert_eq!(image.created_at, None);
    }

    #[test]
    fn test_folder_update_skips_absent_fields() {
        let body = serde_json::to_string(&FolderUpdate::rename("Holidays")).unwrap();
        assert_eq!(body, r#"{"name":"Holidays"}"#);
        assert!(FolderUpdate::default().is_empty());
    }

    #[test]
    fn test_sort_options_cycle() {
        let sort = SortOptions::default();
        assert_eq!(sort.field.as_str(), "name");
        assert_eq!(sort.direction.as_str(), "asc");
        let next = sort.with_next_field().reversed();
        assert_eq!(next, SortOptions::new(SortField::CreatedAt, SortDirection::Desc));
    }

    #[test]
    fn test_image_record_is_camel_case() {
        let record = ImageRecord {
            key: "abc.png".into(),
            name: "cat.png".into(),
            content_type: "image/png".into(),
            size: 42,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["contentType"], "image/png");
        assert_eq!(value["size"], 42);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}
