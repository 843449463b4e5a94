use actix_cors::Cors;
use actix_web::http::{header, uri::Uri};
use log::warn;
use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IOError, ErrorKind},
    string::String as IOString,
    vec::Vec as IOVec,
};

/// The storefront dev servers the gateway answers by default when no
/// `.env_cors` file is present.
pub fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

/// Reads one origin per line, skipping lines that do not parse as a URI.
/// A file where every line fails validation is a configuration error.
pub fn load_and_validate_cors_origins(path: &str) -> Result<IOVec<IOString>, IOError> {
    let file = File::open(path)?;
    let buf_reader = BufReader::new(file);
    let mut origins = Vec::new();
    let mut all_lines_failed = true;

    for line in buf_reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Uri>() {
            Ok(_) => {
                origins.push(line);
                all_lines_failed = false;
            }
            Err(e) => {
                warn!("Invalid URI in CORS configuration: {}", e);
            }
        }
    }

    if all_lines_failed {
        return Err(IOError::new(
            ErrorKind::InvalidData,
            "All CORS lines failed validation.",
        ));
    }

    Ok(origins)
}

/// Builds the restrictive CORS layer from the configured allow-list.
pub fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    // Dynamically add allowed origins from the configured allow-list
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_valid_origins_and_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http://localhost:3000").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "http://127.0.0.1:3000").unwrap();

        let origins = load_and_validate_cors_origins(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string()
            ]
        );
    }

    #[test]
    fn missing_file_reports_not_found() {
        let err = load_and_validate_cors_origins("definitely-not-a-real-file").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn all_invalid_lines_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a uri at all").unwrap();

        let err = load_and_validate_cors_origins(file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn default_origins_cover_local_dev() {
        let origins = default_origins();
        assert!(origins.contains(&"http://localhost:3000".to_string()));
        assert!(origins.contains(&"http://127.0.0.1:3000".to_string()));
    }
}
