//! Scripted content service for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use crate::content::{RawPage, RawPostData, RawPostDocument, RawPostRecord};
use crate::error::{FetchError, ProtocolError};
use crate::traits::{ContentService, QueryOptions};
use crate::types::{ContentRef, Cursor, DocumentType, Uid};
use crate::Result;

#[derive(Clone)]
pub(crate) enum Reply {
    Page(RawPage),
    Fail(u16),
}

/// Answers queries from a table keyed by cursor token (`None` = first page).
#[derive(Default)]
pub(crate) struct ScriptedService {
    replies: Mutex<HashMap<Option<String>, Reply>>,
    calls: Mutex<Vec<Cursor>>,
    gate: Option<Arc<Semaphore>>,
    entered: Arc<Notify>,
}

impl ScriptedService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(self, cursor: Option<&str>, uids: &[&str], next: Option<&str>) -> Self {
        self.set(cursor, Reply::Page(page(uids, next)));
        self
    }

    pub(crate) fn fail(self, cursor: Option<&str>, status: u16) -> Self {
        self.set(cursor, Reply::Fail(status));
        self
    }

    /// Every query waits for one permit of `gate` before answering.
    pub(crate) fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn set(&self, cursor: Option<&str>, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert(cursor.map(String::from), reply);
    }

    pub(crate) fn calls(&self) -> Vec<Cursor> {
        self.calls.lock().unwrap().clone()
    }

    /// Notified each time a query starts.
    pub(crate) fn entered(&self) -> Arc<Notify> {
        self.entered.clone()
    }
}

#[async_trait]
impl ContentService for ScriptedService {
    async fn query_by_type(
        &self,
        _document_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<RawPage> {
        self.calls.lock().unwrap().push(options.cursor.clone());
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&options.cursor.token().map(String::from))
            .cloned();

        match reply {
            Some(Reply::Page(page)) => Ok(page),
            Some(Reply::Fail(status)) => {
                Err(FetchError::Protocol(ProtocolError::new(status, None)).into())
            }
            None => Err(FetchError::Decode {
                message: format!("no scripted page for {}", options.cursor),
            }
            .into()),
        }
    }

    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &Uid,
        _content_ref: Option<&ContentRef>,
    ) -> Result<RawPostDocument> {
        Err(FetchError::NotFound {
            document_type: document_type.to_string(),
            uid: uid.to_string(),
        }
        .into())
    }
}

pub(crate) fn record(uid: &str) -> RawPostRecord {
    RawPostRecord {
        id: Some(format!("id-{}", uid)),
        uid: Some(uid.to_string()),
        first_publication_date: Some("2021-03-25T19:25:28+0000".to_string()),
        data: RawPostData {
            title: Some(format!("Title {}", uid)),
            subtitle: Some(format!("Subtitle {}", uid)),
            author: Some("Ana".to_string()),
        },
    }
}

pub(crate) fn page(uids: &[&str], next: Option<&str>) -> RawPage {
    RawPage::new(
        uids.iter().map(|uid| record(uid)).collect(),
        Cursor::from(next.map(String::from)),
    )
}
