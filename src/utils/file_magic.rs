/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// 试卷上传只开放 PDF，但校验函数保持按扩展名分派，
/// 允许的扩展名集合由配置决定。
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".pdf"）
///
/// # Returns
/// * `true` - 魔术字节匹配
/// * `false` - 魔术字节不匹配或格式未知
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".pdf" => data.starts_with(b"%PDF"),

        // MS Office 旧格式 (OLE Compound Document)
        ".doc" => data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
        // MS Office 新格式 (ZIP-based OOXML)
        ".docx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

/// 判断内容是否为 PDF（流式上传第一个 chunk 上调用）
pub fn is_pdf(data: &[u8]) -> bool {
    validate_magic_bytes(data, ".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.7";
        assert!(validate_magic_bytes(pdf_header, ".pdf"));
        assert!(validate_magic_bytes(pdf_header, ".PDF"));
        assert!(is_pdf(pdf_header));
    }

    #[test]
    fn test_non_pdf_rejected() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(!validate_magic_bytes(&png_header, ".pdf"));
        assert!(!is_pdf(&png_header));
    }

    #[test]
    fn test_doc_magic() {
        let doc_header = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        assert!(validate_magic_bytes(&doc_header, ".doc"));
        assert!(!validate_magic_bytes(&doc_header, ".pdf"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".pdf"));
        assert!(!is_pdf(&[]));
    }

    #[test]
    fn test_unknown_extension() {
        let data = b"%PDF-1.4";
        assert!(!validate_magic_bytes(data, ".exe"));
        assert!(!validate_magic_bytes(data, ".zip"));
    }
}
