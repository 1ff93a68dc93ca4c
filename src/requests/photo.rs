use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::TryStreamExt;
use thiserror::Error;

use crate::services::access::AccessGate;
use crate::services::storage::{PendingUpload, StorageError, UploadStorage, sanitize_filename};

/// Longest `authId` value that is read. Anything longer is rejected unread.
pub const MAX_AUTH_ID_LEN: usize = 1024;

#[derive(Error, Debug)]
pub enum UploadFormError {
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug)]
pub struct StagedPhoto {
    pub filename: String,
    pub upload: PendingUpload,
}

/// Outcome of reading the upload form.
#[derive(Debug)]
pub enum UploadForm {
    /// The authorization id was wrong, too long, or missing.
    Rejected,
    Accepted { photo: Option<StagedPhoto> },
}

impl UploadForm {
    /// Streams the form. The `authId` field is checked as soon as it has been
    /// read, so a bad id sent ahead of the file stops the request before the
    /// file body is consumed. A file that arrives first is staged on disk and
    /// discarded if the id later turns out to be wrong.
    pub async fn read(
        mut payload: Multipart,
        gate: &AccessGate,
        storage: &UploadStorage,
    ) -> Result<Self, UploadFormError> {
        let mut authorized = false;
        let mut photo = None;

        while let Some(mut field) = payload.try_next().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("authId") => match read_text(&mut field, MAX_AUTH_ID_LEN).await? {
                    Some(token) if gate.authorize(&token) => authorized = true,
                    _ => return Ok(Self::Rejected),
                },
                Some("photo") => {
                    let filename = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .and_then(sanitize_filename)
                        .map(str::to_string);

                    // A "photo" field without a usable filename is not a file.
                    match filename {
                        Some(filename) => {
                            let upload = stage(&mut field, storage).await?;
                            photo = Some(StagedPhoto { filename, upload });
                        }
                        None => drain(&mut field).await?,
                    }
                }
                _ => drain(&mut field).await?,
            }
        }

        if !authorized {
            return Ok(Self::Rejected);
        }
        Ok(Self::Accepted { photo })
    }
}

/// Reads a text field, or returns `None` once it grows past `limit` bytes.
async fn read_text(field: &mut Field, limit: usize) -> Result<Option<String>, MultipartError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

async fn stage(field: &mut Field, storage: &UploadStorage) -> Result<PendingUpload, UploadFormError> {
    let mut upload = storage.begin().await?;
    while let Some(chunk) = field.try_next().await? {
        upload.write(&chunk).await?;
    }
    Ok(upload)
}

async fn drain(field: &mut Field) -> Result<(), MultipartError> {
    while field.try_next().await?.is_some() {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::PayloadError;
    use actix_web::http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
    use actix_web::web::Bytes;
    use futures_util::{StreamExt, stream};
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::tempdir;

    const BOUNDARY: &str = "form-boundary";
    const FILE_CHUNKS: usize = 256;

    fn text_part(name: &str, value: &str) -> String {
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
    }

    fn file_head(filename: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{filename}\"\r\n\
             Content-Type: image/png\r\n\r\n"
        )
    }

    /// Builds a multipart payload whose file body is split into many chunks,
    /// counting how many chunks the parser pulls.
    fn payload(head: String, tail: String, polled: Rc<Cell<usize>>) -> Multipart {
        let mut chunks = vec![Bytes::from(head)];
        chunks.extend((0..FILE_CHUNKS).map(|_| Bytes::from(vec![0u8; 64 * 1024])));
        chunks.push(Bytes::from(tail));

        let body = stream::iter(chunks.into_iter().map(Ok::<_, PayloadError>))
            .inspect(move |_| polled.set(polled.get() + 1));

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={BOUNDARY}")).unwrap(),
        );
        Multipart::new(&headers, body)
    }

    fn dir_is_empty(storage: &UploadStorage) -> bool {
        std::fs::read_dir(storage.dir()).unwrap().next().is_none()
    }

    #[actix_web::test]
    async fn wrong_id_before_file_stops_reading() {
        let root = tempdir().unwrap();
        let storage = UploadStorage::new(root.path());
        let gate = AccessGate::new("open-sesame");
        let polled = Rc::new(Cell::new(0));

        let head = text_part("authId", "wrong") + &file_head("big.png");
        let tail = format!("\r\n--{BOUNDARY}--\r\n");
        let form = UploadForm::read(payload(head, tail, polled.clone()), &gate, &storage)
            .await
            .unwrap();

        assert!(matches!(form, UploadForm::Rejected));
        assert!(polled.get() < FILE_CHUNKS / 2);
        assert!(dir_is_empty(&storage));
    }

    #[actix_web::test]
    async fn wrong_id_after_file_discards_staged_file() {
        let root = tempdir().unwrap();
        let storage = UploadStorage::new(root.path());
        let gate = AccessGate::new("open-sesame");
        let polled = Rc::new(Cell::new(0));

        let head = file_head("big.png");
        let tail = format!("\r\n{}--{BOUNDARY}--\r\n", text_part("authId", "wrong"));
        let form = UploadForm::read(payload(head, tail, polled), &gate, &storage)
            .await
            .unwrap();

        assert!(matches!(form, UploadForm::Rejected));
        assert!(dir_is_empty(&storage));
    }

    #[actix_web::test]
    async fn correct_id_stages_whole_file() {
        let root = tempdir().unwrap();
        let storage = UploadStorage::new(root.path());
        let gate = AccessGate::new("open-sesame");
        let polled = Rc::new(Cell::new(0));

        let head = text_part("authId", "open-sesame") + &file_head("dir/big.png");
        let tail = format!("\r\n--{BOUNDARY}--\r\n");
        let form = UploadForm::read(payload(head, tail, polled), &gate, &storage)
            .await
            .unwrap();

        let UploadForm::Accepted { photo: Some(photo) } = form else {
            panic!("expected a staged photo");
        };
        assert_eq!(photo.filename, "big.png");
        assert_eq!(photo.upload.len(), (FILE_CHUNKS * 64 * 1024) as u64);
    }

    #[actix_web::test]
    async fn overlong_id_is_rejected() {
        let root = tempdir().unwrap();
        let storage = UploadStorage::new(root.path());
        let long = "x".repeat(MAX_AUTH_ID_LEN + 1);
        let gate = AccessGate::new(long.clone());
        let polled = Rc::new(Cell::new(0));

        let head = text_part("authId", &long) + &file_head("big.png");
        let tail = format!("\r\n--{BOUNDARY}--\r\n");
        let form = UploadForm::read(payload(head, tail, polled), &gate, &storage)
            .await
            .unwrap();

        assert!(matches!(form, UploadForm::Rejected));
    }
}
