use std::fmt;

/// Request methods understood by the decoder. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Options,
    Get,
    Post,
    Put,
    Delete,
    Trace,
    Connect,
}

impl Method {
    pub const ALL: [Method; 7] =
        [Method::Options, Method::Get, Method::Post, Method::Put, Method::Delete, Method::Trace, Method::Connect];

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let method = match bytes {
            b"OPTIONS" => Method::Options,
            b"GET" => Method::Get,
            b"POST" => Method::Post,
            b"PUT" => Method::Put,
            b"DELETE" => Method::Delete,
            b"TRACE" => Method::Trace,
            b"CONNECT" => Method::Connect,
            _ => return None,
        };
        Some(method)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Options => "OPTIONS",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for method in Method::ALL {
            assert_eq!(Method::from_bytes(method.as_str().as_bytes()), Some(method));
        }
    }

    #[test]
    fn matching_is_exact() {
        assert_eq!(Method::from_bytes(b"get"), None);
        assert_eq!(Method::from_bytes(b"HEAD"), None);
        assert_eq!(Method::from_bytes(b"PATCH"), None);
        assert_eq!(Method::from_bytes(b"GET "), None);
        assert_eq!(Method::from_bytes(b""), None);
    }
}
