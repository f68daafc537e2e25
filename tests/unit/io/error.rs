//! Tests for error formatting and conversion

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use tilegrid::GridError;
    use tilegrid::io::error::{invalid_map, invalid_parameter};

    // Verified by dropping the reason from the message
    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("tile_size", &-1.5, &"must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'tile_size' = '-1.5': must be positive"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_invalid_map_display() {
        assert_eq!(
            invalid_map(&"cost map has no tiles").to_string(),
            "Invalid map data: cost map has no tiles"
        );
    }

    // I/O failures keep their underlying cause
    // Verified by returning None from source()
    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = GridError::from(io_error);

        assert!(matches!(error, GridError::FileSystem { .. }));
        assert!(error.to_string().contains("gone"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_file_system_display() {
        let error = GridError::FileSystem {
            path: PathBuf::from("out/maps"),
            operation: "create directory",
            source: std::io::Error::other("denied"),
        };
        assert_eq!(
            error.to_string(),
            "File system error during create directory on 'out/maps': denied"
        );
    }
}
