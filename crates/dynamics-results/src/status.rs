//! HTTP status classification.

/// True iff `status` is in the 2xx range.
pub fn status_is_good(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries() {
        assert!(!status_is_good(199));
        assert!(status_is_good(200));
        assert!(status_is_good(204));
        assert!(status_is_good(299));
        assert!(!status_is_good(300));
    }

    #[test]
    fn test_status_extremes() {
        assert!(!status_is_good(0));
        assert!(!status_is_good(404));
        assert!(!status_is_good(500));
        assert!(!status_is_good(u16::MAX));
    }
}
