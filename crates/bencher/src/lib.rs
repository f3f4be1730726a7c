//! Inputs shared by the benchmarks.

use std::fmt::Write;

#[derive(Debug, Copy, Clone)]
pub struct Fixture {
    name: &'static str,
    content: &'static str,
}

impl Fixture {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn bytes(&self) -> &'static [u8] {
        self.content.as_bytes()
    }

    pub fn len(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

pub static SMALL_GET: Fixture = Fixture::new("small_get", "GET / HTTP/1.1\r\nHost: 127.0.0.1:5959\r\nAccept: */*\r\n\r\n");

pub static LARGE_GET: Fixture = Fixture::new(
    "large_get",
    concat!(
        "GET /get-all-features HTTP/1.1\r\n",
        "Host: tracker.internal:5959\r\n",
        "Connection: keep-alive\r\n",
        "Cache-Control: max-age=0\r\n",
        "sec-ch-ua: \"Chromium\";v=\"128\", \"Not;A=Brand\";v=\"24\"\r\n",
        "sec-ch-ua-mobile: ?0\r\n",
        "sec-ch-ua-platform: \"Linux\"\r\n",
        "Upgrade-Insecure-Requests: 1\r\n",
        "User-Agent: Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36\r\n",
        "Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8\r\n",
        "Sec-Fetch-Site: none\r\n",
        "Sec-Fetch-Mode: navigate\r\n",
        "Sec-Fetch-User: ?1\r\n",
        "Sec-Fetch-Dest: document\r\n",
        "Accept-Encoding: gzip, deflate, br, zstd\r\n",
        "Accept-Language: en-US,en;q=0.9\r\n",
        "Cookie: session=8f2a61c7d03e4b9a; theme=dark; last_project=p-1024\r\n",
        "\r\n",
    ),
);

pub static POST_FEATURE: Fixture = Fixture::new(
    "post_feature",
    concat!(
        "POST /insert-feature HTTP/1.1\r\n",
        "Host: 127.0.0.1:5959\r\n",
        "Content-Type: application/json\r\n",
        "Content-Length: 164\r\n",
        "\r\n",
        r#"{"Id":"f-1","Name":"Login","Description":"sign in with email","Priority":"high","ProjectId":"p-1","CreationDate":"2024-01-02","OwnerId":"u-1","State":"in-progress"}"#,
    ),
);

/// A json array of `count` features, as returned by `/get-all-features`.
pub fn feature_list(count: usize) -> String {
    let mut json = String::from("[");
    for i in 0..count {
        if i > 0 {
            json.push(',');
        }
        let _ = write!(
            json,
            r#"{{"Id":"f-{i}","Name":"Feature {i}","Description":"generated","Priority":"medium","ProjectId":"p-{}","CreationDate":"2024-03-{:02}","OwnerId":"u-{}","State":"todo"}}"#,
            i % 7,
            i % 28 + 1,
            i % 13,
        );
    }
    json.push(']');
    json
}
