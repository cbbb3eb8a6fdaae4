//! Unit tests for SourcePosition

use core_types::SourcePosition;

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_zero_values() {
        let pos = SourcePosition::default();

        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_source_position_large_values() {
        let pos = SourcePosition::new(u32::MAX, u32::MAX, usize::MAX);

        assert_eq!(pos.line, u32::MAX);
        assert_eq!(pos.column, u32::MAX);
        assert_eq!(pos.offset, usize::MAX);
    }

    #[test]
    fn test_source_position_copy() {
        let pos1 = SourcePosition::new(42, 7, 1000);
        let pos2 = pos1;

        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_source_position_equality() {
        let pos1 = SourcePosition::new(1, 2, 3);
        let pos2 = SourcePosition::new(1, 2, 3);
        let pos3 = SourcePosition::new(1, 3, 4);

        assert_eq!(pos1, pos2);
        assert_ne!(pos1, pos3);
    }

    #[test]
    fn test_source_position_display_uses_line_and_column() {
        let pos = SourcePosition::new(12, 4, 300);
        assert_eq!(format!("{}", pos), "12:4");
    }
}
