//! Filesystem storage for the file-backed content service.
//!
//! Layout: `<root>/<type>/<uid>.json`, one full document per file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::{debug, instrument, warn};

use lede_core::Result;
use lede_core::error::{Error, FetchError, InvalidInputError};
use lede_core::content::RawPostData;
use lede_core::{Cursor, DocumentType, RawPage, RawPostDocument, RawPostRecord, Uid};

/// Timestamp format used by the search API (`2021-03-25T19:25:28+0000`).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

fn map_io(err: std::io::Error) -> Error {
    Error::FetchFailed(FetchError::from(err))
}

fn not_found(document_type: &DocumentType, uid: &Uid) -> Error {
    Error::FetchFailed(FetchError::NotFound {
        document_type: document_type.to_string(),
        uid: uid.to_string(),
    })
}

/// Reduce a full document to the fields a listing carries.
pub fn listing_record(document: RawPostDocument) -> RawPostRecord {
    RawPostRecord {
        id: document.id,
        uid: document.uid,
        first_publication_date: document.first_publication_date,
        data: RawPostData {
            title: document.data.title,
            subtitle: document.data.subtitle,
            author: document.data.author,
        },
    }
}

/// Filesystem-backed document storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the directory holding documents of one type.
    fn type_dir(&self, document_type: &DocumentType) -> PathBuf {
        self.root.join(document_type.as_str())
    }

    /// Get the path for a specific document.
    ///
    /// Fails for uids that would resolve outside the type directory.
    fn document_path(&self, document_type: &DocumentType, uid: &Uid) -> Result<PathBuf> {
        uid.ensure_path_safe()?;
        Ok(self
            .type_dir(document_type)
            .join(format!("{}.json", uid.as_str())))
    }

    async fn read_path(&self, path: &Path, stem: &str) -> Result<RawPostDocument> {
        let content = fs::read_to_string(path).await.map_err(map_io)?;
        let mut document: RawPostDocument = serde_json::from_str(&content).map_err(|e| {
            Error::FetchFailed(FetchError::Decode {
                message: format!("{}: {}", path.display(), e),
            })
        })?;

        // The file name is the uid when the document does not carry one.
        if document.uid.is_none() {
            document.uid = Some(stem.to_string());
        }

        Ok(document)
    }

    /// Read one document.
    #[instrument(skip(self))]
    pub async fn get_document(
        &self,
        document_type: &DocumentType,
        uid: &Uid,
    ) -> Result<RawPostDocument> {
        let path = self.document_path(document_type, uid)?;

        if !fs::try_exists(&path).await.map_err(map_io)? {
            return Err(not_found(document_type, uid));
        }

        self.read_path(&path, uid.as_str()).await
    }

    /// Write a document, replacing any previous version.
    ///
    /// The uid is required; a missing publication date is set to now.
    #[instrument(skip(self, document))]
    pub async fn put_document(
        &self,
        document_type: &DocumentType,
        mut document: RawPostDocument,
    ) -> Result<Uid> {
        let uid = match document.uid.as_deref() {
            Some(uid) => Uid::new(uid)?,
            None => {
                return Err(InvalidInputError::Other {
                    message: "document has no uid".to_string(),
                }
                .into());
            }
        };

        if document.first_publication_date.is_none() {
            let now = Utc::now().format(TIMESTAMP_FORMAT).to_string();
            document.first_publication_date = Some(now);
        }

        let path = self.document_path(document_type, &uid)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(map_io)?;
        }

        let content = serde_json::to_string_pretty(&document).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).await.map_err(map_io)?;
        fs::rename(&temp_path, &path).await.map_err(map_io)?;

        debug!(uid = %uid, "Stored document");

        Ok(uid)
    }

    /// Sorted file stems of every document of `document_type`.
    async fn stems(&self, document_type: &DocumentType) -> Result<Vec<String>> {
        let dir = self.type_dir(document_type);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io(e)),
        };

        let mut stems = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(map_io)? {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }

        stems.sort();
        Ok(stems)
    }

    /// List one page of documents, ordered by file name.
    ///
    /// `cursor` is the last uid of the previous page. The returned cursor
    /// is the last uid of this page, or the end marker when nothing
    /// follows it.
    #[instrument(skip(self))]
    pub async fn list_documents(
        &self,
        document_type: &DocumentType,
        page_size: u32,
        cursor: &Cursor,
    ) -> Result<RawPage> {
        let stems = self.stems(document_type).await?;
        let limit = page_size.max(1) as usize;

        let start = match cursor.token() {
            Some(after) => stems.partition_point(|s| s.as_str() <= after),
            None => 0,
        };
        let end = (start + limit).min(stems.len());

        let dir = self.type_dir(document_type);
        let mut results = Vec::with_capacity(end - start);
        for stem in &stems[start..end] {
            let path = dir.join(format!("{}.json", stem));
            match self.read_path(&path, stem).await {
                Ok(document) => results.push(listing_record(document)),
                Err(Error::FetchFailed(FetchError::Decode { message })) => {
                    warn!(%message, "Skipping undecodable document");
                }
                Err(e) => return Err(e),
            }
        }

        let next_page = if end < stems.len() {
            Cursor::new(stems[end - 1].clone())
        } else {
            Cursor::END
        };

        let mut page = RawPage::new(results, next_page);
        page.total_results_size = Some(stems.len() as u64);
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lede_core::content::{RawPostBody, RawSection, RichTextBlock};
    use tempfile::TempDir;

    fn document(uid: &str) -> RawPostDocument {
        RawPostDocument {
            id: Some(format!("id-{}", uid)),
            uid: Some(uid.to_string()),
            first_publication_date: Some("2021-03-25T19:25:28+0000".to_string()),
            data: RawPostBody {
                title: Some(format!("Title {}", uid)),
                subtitle: Some("Subtitle".to_string()),
                author: Some("Ana".to_string()),
                content: vec![RawSection {
                    heading: Some("Intro".to_string()),
                    body: vec![RichTextBlock::paragraph("one two three")],
                }],
                ..Default::default()
            },
        }
    }

    async fn store_with(uids: &[&str]) -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        for uid in uids {
            store
                .put_document(&DocumentType::post(), document(uid))
                .await
                .unwrap();
        }
        (dir, store)
    }

    fn uids(page: &RawPage) -> Vec<&str> {
        page.results.iter().filter_map(|r| r.uid.as_deref()).collect()
    }

    #[tokio::test]
    async fn put_then_get() {
        let (_dir, store) = store_with(&["hello"]).await;

        let uid = Uid::new("hello").unwrap();
        let read = store.get_document(&DocumentType::post(), &uid).await.unwrap();

        assert_eq!(read, document("hello"));
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let (_dir, store) = store_with(&[]).await;

        let uid = Uid::new("nope").unwrap();
        let result = store.get_document(&DocumentType::post(), &uid).await;

        assert!(matches!(
            result,
            Err(Error::FetchFailed(FetchError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn uids_with_spaces_are_stored_and_listed() {
        let (_dir, store) = store_with(&["my post"]).await;
        let post = DocumentType::post();

        let uid = Uid::new("my post").unwrap();
        let read = store.get_document(&post, &uid).await.unwrap();
        assert_eq!(read.uid.as_deref(), Some("my post"));

        let page = store.list_documents(&post, 2, &Cursor::END).await.unwrap();
        assert_eq!(uids(&page), ["my post"]);
        let summaries = lede_core::normalize_page(page.results).unwrap();
        assert_eq!(summaries[0].uid().as_str(), "my post");
    }

    #[tokio::test]
    async fn uids_cannot_escape_the_type_directory() {
        let (_dir, store) = store_with(&[]).await;

        let uid = Uid::new("../secret").unwrap();
        let result = store.get_document(&DocumentType::post(), &uid).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = store
            .put_document(&DocumentType::post(), document("../secret"))
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn put_requires_a_uid_and_stamps_the_date() {
        let (_dir, store) = store_with(&[]).await;

        let result = store
            .put_document(&DocumentType::post(), RawPostDocument::default())
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let undated = RawPostDocument {
            uid: Some("fresh".to_string()),
            ..Default::default()
        };
        let uid = store
            .put_document(&DocumentType::post(), undated)
            .await
            .unwrap();
        let read = store.get_document(&DocumentType::post(), &uid).await.unwrap();
        let date = read.first_publication_date.unwrap();
        assert!(lede_core::normalize::parse_timestamp(&date).is_some());
    }

    #[tokio::test]
    async fn pages_follow_file_name_order() {
        let (_dir, store) = store_with(&["c", "a", "e", "b", "d"]).await;
        let post = DocumentType::post();

        let first = store.list_documents(&post, 2, &Cursor::END).await.unwrap();
        assert_eq!(uids(&first), ["a", "b"]);
        assert_eq!(first.next_page, Cursor::new("b"));
        assert_eq!(first.total_results_size, Some(5));

        let second = store
            .list_documents(&post, 2, &first.next_page)
            .await
            .unwrap();
        assert_eq!(uids(&second), ["c", "d"]);

        let last = store
            .list_documents(&post, 2, &second.next_page)
            .await
            .unwrap();
        assert_eq!(uids(&last), ["e"]);
        assert!(last.next_page.is_end());
    }

    #[tokio::test]
    async fn exact_final_page_has_no_cursor() {
        let (_dir, store) = store_with(&["a", "b"]).await;

        let page = store
            .list_documents(&DocumentType::post(), 2, &Cursor::END)
            .await
            .unwrap();

        assert_eq!(uids(&page), ["a", "b"]);
        assert!(page.next_page.is_end());
    }

    #[tokio::test]
    async fn missing_type_directory_is_empty() {
        let (_dir, store) = store_with(&[]).await;

        let page = store
            .list_documents(&DocumentType::post(), 2, &Cursor::END)
            .await
            .unwrap();

        assert!(page.results.is_empty());
        assert!(page.next_page.is_end());
    }

    #[tokio::test]
    async fn undecodable_files_are_skipped_and_uid_defaults_to_the_file_name() {
        let (dir, store) = store_with(&["a"]).await;
        let post_dir = dir.path().join("post");
        std::fs::write(post_dir.join("b.json"), "{ not json").unwrap();
        std::fs::write(
            post_dir.join("c.json"),
            r#"{"first_publication_date": "2021-03-25T19:25:28+0000", "data": {"title": "C"}}"#,
        )
        .unwrap();
        std::fs::write(post_dir.join("notes.txt"), "ignored").unwrap();

        let page = store
            .list_documents(&DocumentType::post(), 10, &Cursor::END)
            .await
            .unwrap();

        assert_eq!(uids(&page), ["a", "c"]);
    }

    #[test]
    fn listing_record_keeps_listing_fields() {
        let record = listing_record(document("x"));

        assert_eq!(record.uid.as_deref(), Some("x"));
        assert_eq!(record.data.title.as_deref(), Some("Title x"));
        assert_eq!(record.data.author.as_deref(), Some("Ana"));
        assert_eq!(record.data.subtitle.as_deref(), Some("Subtitle"));
    }
}
