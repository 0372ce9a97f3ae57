//! Centralized naming for item folders, page labels and public URLs.
//!
//! Every item is keyed by its identifier padded to two digits. The same key
//! names the folder (`cancion03`), the PDF (`cancion03.pdf`), the index link
//! (`./cancion03/index.html`) and the QR target URL.
//!
//! ```text
//! id 3, prefix "cancion"   → cancion03
//! cancion03, label Canción → Canción 03
//! ```

/// Player page inside an item folder, and the list index inside a list root.
pub const PAGE_FILE: &str = "index.html";
pub const QR_FILE: &str = "qr.png";
pub const INFO_FILE: &str = "info.png";
/// Subdirectory of a list root holding the PDFs.
pub const PDF_DIR: &str = "pdfs";

/// Zero-pad an identifier to at least two digits.
///
/// Identifiers of 100 and above keep all their digits (`123` → `"123"`).
pub fn pad_identifier(id: u32) -> String {
    format!("{:02}", id)
}

/// Folder name for an item: `prefix` followed by the padded identifier.
pub fn folder_name(prefix: &str, id: u32) -> String {
    format!("{}{}", prefix, pad_identifier(id))
}

/// Human label for a folder, with the prefix replaced by `label`.
///
/// `cancion03` with prefix `cancion` and label `Canción` becomes
/// `Canción 03`. A folder without the prefix is returned unchanged.
pub fn folder_label(folder: &str, prefix: &str, label: &str) -> String {
    match folder.strip_prefix(prefix) {
        Some(rest) => format!("{} {}", label, rest),
        None => folder.to_string(),
    }
}

/// Public URL of an item page: `{domain}/{public_path}/{list}/{folder}/`.
///
/// A trailing slash on the domain is dropped so the URL never contains `//`
/// after the host.
pub fn item_url(domain: &str, public_path: &str, list: &str, folder: &str) -> String {
    let domain = domain.trim_end_matches('/');
    let public_path = public_path.trim_matches('/');
    if public_path.is_empty() {
        format!("{}/{}/{}/", domain, list, folder)
    } else {
        format!("{}/{}/{}/{}/", domain, public_path, list, folder)
    }
}

/// Relative link from the list index to an item page.
pub fn index_link(folder: &str) -> String {
    format!("./{}/{}", folder, PAGE_FILE)
}
