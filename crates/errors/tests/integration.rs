//! Integration tests for error types

#[cfg(test)]
mod tests {
    use lockcheck_errors::*;

    #[test]
    fn test_error_conversion() {
        let err: Error = VerifyError::ToolFailed {
            program: "update-locked".into(),
            status: "exit status: 2".into(),
        }
        .into();
        assert!(matches!(err, Error::Verify(_)));
        assert!(!err.is_out_of_date());
    }

    #[test]
    fn test_out_of_date_display() {
        let err: Error = VerifyError::OutOfDate {
            files: vec!["dev.txt".into(), "prod.txt".into()],
        }
        .into();
        assert!(err.is_out_of_date());
        let message = err.to_string();
        assert!(message.starts_with("locked requirements out of date: dev.txt, prod.txt"));
        assert_eq!(err.user_code(), Some("verify.out_of_date"));
        assert!(err.user_hint().is_some());
    }

    #[test]
    fn test_nothing_is_retryable() {
        let io = std::io::Error::new(std::io::ErrorKind::Interrupted, "interrupted");
        let errors: Vec<Error> = vec![
            io.into(),
            StorageError::CorruptedData {
                message: "bad".into(),
            }
            .into(),
            VerifyError::OutOfDate { files: vec![] }.into(),
        ];
        assert!(errors.iter().all(|e| !e.is_retryable()));
    }

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = StorageError::from_io_with_path(&io_err, std::path::Path::new("req/dev.txt"));
        assert!(matches!(err, StorageError::PathNotFound { ref path } if path == "req/dev.txt"));

        let err = Error::io_with_path(&io_err, "req/dev.txt");
        assert!(err.user_message().contains("req/dev.txt"));
    }
}
