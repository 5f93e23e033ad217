/*!
 * Utility functions for dirbook
 */

/// Size in kilobytes rounded to two decimals
pub fn format_kb(size: u64) -> String {
    let kb = (size as f64 / 1024.0 * 100.0).round() / 100.0;
    format!("{}", kb)
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0), "0");
        assert_eq!(format_kb(1024), "1");
        assert_eq!(format_kb(1500), "1.46");
        assert_eq!(format_kb(10 * 1024 + 512), "10.5");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }
}
