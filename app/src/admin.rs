//! Admin-side operations: editing records, managing contact messages and
//! importing documents as blog drafts.

use crate::{AppError, Result};
use chrono::{DateTime, Datelike, Utc};
use content::{ensure_docx, import_document};
use database::{Collection, Record, RecordStore, Records, Stored};
use entities::{BlogPostForm, ContactMessage, EditorState, RecordForm};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

const REPLY_SUBJECT: &str = "Re: Your Message";
const BULK_MAIL_SUBJECT: &str = "Newsletter Update";
const CSV_HEADER: [&str; 4] = ["Name", "Email", "Message", "Date"];

/// Record counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub blog_posts: i64,
    pub projects: i64,
    pub certificates: i64,
    pub contacts: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    /// Messages received in the current calendar month
    pub this_month: usize,
    /// Distinct sender email addresses
    pub unique_contacts: usize,
}

pub struct AdminService {
    store: Arc<dyn RecordStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn records<T: Record>(&self) -> Records<'_, T> {
        Records::new(self.store.as_ref())
    }

    /// Persist the form of an editor screen
    ///
    /// Inserts a new record unless the state is editing an existing one, in
    /// which case that record is replaced. The state is reset on success and
    /// left as it was on failure so the editor keeps the draft.
    pub async fn submit<F: RecordForm>(&self, state: &mut EditorState<F>) -> Result<Stored<F::Record>> {
        let record = state.form.to_record()?;
        let records = self.records::<F::Record>();

        let stored = match state.editing_id() {
            Some(id) => records.update(id, &record).await?,
            None => records.create(&record).await?,
        };

        info!("Saved {} record {}", F::Record::collection(), stored.id);
        state.cancel();

        Ok(stored)
    }

    /// Open an editor on a stored record
    pub async fn edit<F: RecordForm>(&self, id: &str) -> Result<EditorState<F>> {
        let stored = self
            .records::<F::Record>()
            .get(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} with id: {}", F::Record::collection(), id))
            })?;

        let mut state = EditorState::new();
        state.begin_edit(stored.id, &stored.record);
        Ok(state)
    }

    /// List a collection, newest first
    pub async fn list<T: Record>(&self) -> Result<Vec<Stored<T>>> {
        Ok(self.records::<T>().all().await?)
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        self.store.delete(collection, id).await?;
        info!("Deleted {} record {}", collection, id);
        Ok(())
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        Ok(DashboardStats {
            blog_posts: self.store.count(Collection::BlogPosts).await?,
            projects: self.store.count(Collection::Projects).await?,
            certificates: self.store.count(Collection::Certificates).await?,
            contacts: self.store.count(Collection::Contacts).await?,
        })
    }

    /// Summarize the contact messages relative to `now`
    pub async fn contact_stats(&self, now: DateTime<Utc>) -> Result<ContactStats> {
        let messages = self.list::<ContactMessage>().await?;
        Ok(summarize_contacts(&messages, now))
    }

    /// Every contact message as CSV, newest first
    pub async fn export_contacts_csv(&self) -> Result<String> {
        let messages = self.list::<ContactMessage>().await?;
        let csv = contacts_csv(&messages)?;
        info!("Exported {} contact messages", messages.len());
        Ok(csv)
    }

    /// Turn an uploaded Word document, already converted to HTML, into an
    /// open blog post draft
    pub fn import_document(&self, file_name: &str, html: &str) -> Result<EditorState<BlogPostForm>> {
        if let Err(e) = ensure_docx(file_name) {
            warn!("Rejected import of {}: {}", file_name, e);
            return Err(e.into());
        }

        let document = import_document(html);
        info!("Imported '{}' from {}", document.title, file_name);

        Ok(EditorState::with_draft(BlogPostForm::from_import(document)))
    }
}

pub fn summarize_contacts(messages: &[Stored<ContactMessage>], now: DateTime<Utc>) -> ContactStats {
    let this_month = messages
        .iter()
        .filter(|m| m.created_at.year() == now.year() && m.created_at.month() == now.month())
        .count();
    let unique_contacts = messages
        .iter()
        .map(|m| m.record.email.as_str())
        .collect::<HashSet<_>>()
        .len();

    ContactStats {
        total: messages.len(),
        this_month,
        unique_contacts,
    }
}

/// Write contact messages as CSV with a `Name,Email,Message,Date` header
pub fn contacts_csv(messages: &[Stored<ContactMessage>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for message in messages {
        let date = message.created_at.to_rfc3339();
        writer.write_record([
            message.record.name.as_str(),
            message.record.email.as_str(),
            message.record.message.as_str(),
            date.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Build a `mailto:` link replying to a contact message
pub fn reply_link(contact: &ContactMessage) -> String {
    let body = format!(
        "Hi {},\r\n\r\nThank you for your message...",
        contact.name
    );
    format!(
        "mailto:{}?subject={}&body={}",
        contact.email,
        urlencoding::encode(REPLY_SUBJECT),
        urlencoding::encode(&body)
    )
}

/// Build a `mailto:` link addressing every contact in blind copy
pub fn bulk_mail_link(contacts: &[ContactMessage]) -> String {
    let emails: Vec<_> = contacts.iter().map(|c| c.email.as_str()).collect();
    format!(
        "mailto:?bcc={}&subject={}",
        emails.join(";"),
        urlencoding::encode(BULK_MAIL_SUBJECT)
    )
}
