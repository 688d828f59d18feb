//! Response body module
//!
//! Every response carries the same boxed body type, so in-memory pages and
//! streamed files can come out of the same handler.

use futures::stream;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use std::io;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Read size for streamed files
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Body type of every response the server sends
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// Body held entirely in memory
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

pub fn empty() -> ResponseBody {
    full(Bytes::new())
}

/// Stream at most `len` bytes of `file` in `CHUNK_SIZE` frames
///
/// Capped at `len` so the body never outgrows the `Content-Length` taken
/// from the metadata, even if the file grows while it is being sent.
pub fn file_stream(file: File, len: u64) -> ResponseBody {
    let frames = stream::try_unfold(file.take(len), |mut reader| async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);
        Ok::<_, io::Error>(Some((Frame::data(Bytes::from(buf)), reader)))
    });

    StreamBody::new(frames).boxed_unsync()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_stream_spans_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let payload: Vec<u8> = (0..CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &payload).unwrap();

        let file = File::open(&path).await.unwrap();
        let body = file_stream(file, payload.len() as u64);
        let collected = body.collect().await.unwrap().to_bytes();
        assert_eq!(collected, payload);
    }

    #[tokio::test]
    async fn test_file_stream_capped_at_len() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grown.txt");
        std::fs::write(&path, "hello world").unwrap();

        let file = File::open(&path).await.unwrap();
        let collected = file_stream(file, 5).collect().await.unwrap().to_bytes();
        assert_eq!(collected, "hello");
    }

    #[tokio::test]
    async fn test_full_body() {
        let collected = full("page").collect().await.unwrap().to_bytes();
        assert_eq!(collected, "page");
        assert!(empty().collect().await.unwrap().to_bytes().is_empty());
    }
}
