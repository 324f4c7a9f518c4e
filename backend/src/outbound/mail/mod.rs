//! HTTP mail relay adapter.

mod http_mail_sink;

pub use http_mail_sink::HttpMailSink;
