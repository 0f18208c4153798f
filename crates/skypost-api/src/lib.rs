//! Request, response and record schemas for the XRPC endpoints skypost calls.
//!
//! Module paths follow the NSIDs: `com.atproto.repo.getRecord` lives in
//! [`com_atproto::repo::get_record`], `app.bsky.feed.post` in
//! [`app_bsky::feed::post`], and so on.

pub mod app_bsky;
pub mod com_atproto;
