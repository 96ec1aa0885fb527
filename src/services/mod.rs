pub(crate) mod http;

pub(crate) use http::HttpTransport;
