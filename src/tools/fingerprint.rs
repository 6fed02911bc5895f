use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How many leading bytes participate in the fingerprint.
const PREFIX_BYTES: usize = 8192;

/// Hash a bounded prefix of the file as a fast approximate identity key.
///
/// Two files whose first 8 KiB collide map to the same cache entry even if
/// they differ later; with BLAKE3 over distinct prefixes that is a
/// theoretical risk only, accepted in exchange for not reading whole files.
pub fn fingerprint_file(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut buffer = vec![0u8; PREFIX_BYTES];
    let mut filled = 0;
    while filled < buffer.len() {
        let n = file.read(&mut buffer[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    let mut hasher = blake3::Hasher::new();
    hasher.update(&buffer[..filled]);
    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_same_content_same_fingerprint() {
        let mut a = NamedTempFile::new().unwrap();
        let mut b = NamedTempFile::new().unwrap();
        a.write_all(b"identical content").unwrap();
        b.write_all(b"identical content").unwrap();

        assert_eq!(
            fingerprint_file(a.path()).unwrap(),
            fingerprint_file(b.path()).unwrap()
        );
    }

    #[test]
    fn test_different_content_different_fingerprint() {
        let mut a = NamedTempFile::new().unwrap();
        let mut b = NamedTempFile::new().unwrap();
        a.write_all(b"content A").unwrap();
        b.write_all(b"content B").unwrap();

        assert_ne!(
            fingerprint_file(a.path()).unwrap(),
            fingerprint_file(b.path()).unwrap()
        );
    }

    #[test]
    fn test_fingerprint_is_hex_digest() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"short").unwrap();

        let hash = fingerprint_file(f.path()).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_bytes_past_prefix_are_ignored() {
        let mut a = NamedTempFile::new().unwrap();
        let mut b = NamedTempFile::new().unwrap();
        let prefix = vec![0xAB; PREFIX_BYTES];
        a.write_all(&prefix).unwrap();
        a.write_all(b"tail one").unwrap();
        b.write_all(&prefix).unwrap();
        b.write_all(b"a completely different tail").unwrap();

        assert_eq!(
            fingerprint_file(a.path()).unwrap(),
            fingerprint_file(b.path()).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(fingerprint_file(Path::new("/no/such/file.mp4")).is_err());
    }
}
