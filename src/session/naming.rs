//! Suggested filenames for downloaded artifacts

use percent_encoding::percent_decode_str;

/// Name offered when nothing else is known
const FALLBACK_NAME: &str = "converted_file";

/// File name up to its first `.`
///
/// `archive.tar.gz` becomes `archive`, matching what users see as the
/// "name" of a file.
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Extension for a converted file: configured extension, else the chosen
/// option lower-cased, else `converted`
pub fn resolved_extension(output_extension: Option<&str>, selected_option: Option<&str>) -> String {
    output_extension
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .or_else(|| {
            selected_option
                .filter(|opt| !opt.is_empty())
                .map(str::to_lowercase)
        })
        .unwrap_or_else(|| "converted".to_string())
}

/// `converted_<base>.<ext>` for the first uploaded file
pub fn converted_filename(
    first_file: Option<&str>,
    output_extension: Option<&str>,
    selected_option: Option<&str>,
) -> String {
    match first_file {
        Some(name) => format!(
            "converted_{}.{}",
            base_name(name),
            resolved_extension(output_extension, selected_option)
        ),
        None => FALLBACK_NAME.to_string(),
    }
}

/// Filename carried by a `Content-Disposition` header
///
/// Understands `filename="a.mp4"`, `filename=a.mp4` and the RFC 5987
/// `filename*=UTF-8''a%20b.mp4` form, preferring the latter.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let lower = header.to_ascii_lowercase();

    if let Some(i) = lower.find("filename*=") {
        let value = param_value(&header[i + "filename*=".len()..]);
        let encoded = value.find("''").map_or(value, |pos| &value[pos + 2..]);
        if let Ok(decoded) = percent_decode_str(encoded).decode_utf8() {
            let decoded = decoded.trim();
            if !decoded.is_empty() {
                return Some(decoded.to_string());
            }
        }
    }

    let i = lower.find("filename=")?;
    let value = param_value(&header[i + "filename=".len()..]);
    let value = value.trim_matches('\'').trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// One parameter value: a quoted string up to its closing quote, or a token
/// up to the next `;`
fn param_value(rest: &str) -> &str {
    let rest = rest.trim_start();
    match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or(quoted),
        None => rest.split(';').next().unwrap_or(rest).trim(),
    }
}

/// Last path segment of a server-supplied name, or `None` if nothing usable
/// remains
pub fn sanitize_filename(name: &str) -> Option<String> {
    let segment = name.rsplit(['/', '\\']).next()?.trim();
    match segment {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}

/// Name for a URL download: the server's suggestion, else `download.<format>`
pub fn url_download_filename(content_disposition: Option<&str>, format: &str) -> String {
    content_disposition
        .and_then(filename_from_content_disposition)
        .and_then(|name| sanitize_filename(&name))
        .unwrap_or_else(|| format!("download.{format}"))
}
