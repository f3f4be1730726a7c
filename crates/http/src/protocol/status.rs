use std::fmt;

/// Response statuses the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
}

impl Status {
    pub const ALL: [Status; 5] =
        [Status::Ok, Status::BadRequest, Status::NotFound, Status::MethodNotAllowed, Status::InternalServerError];

    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::InternalServerError => "Internal Server Error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_text() {
        assert_eq!(Status::Ok.to_string(), "200 OK");
        assert_eq!(Status::BadRequest.to_string(), "400 Bad Request");
        assert_eq!(Status::NotFound.to_string(), "404 Not Found");
        assert_eq!(Status::MethodNotAllowed.to_string(), "405 Method Not Allowed");
        assert_eq!(Status::InternalServerError.to_string(), "500 Internal Server Error");
        assert!(!Status::NotFound.is_success());
    }
}
