//! Certificate field extraction.

use chrono::{DateTime, Utc};

/// Fields read from the leaf certificate. Nothing here is verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CertificateDetails {
    pub subject: String,
    pub issuer: String,
    pub not_after: Option<DateTime<Utc>>,
}

/// Parses a DER-encoded X.509 certificate into its display fields.
///
/// Returns `None` (and logs at debug) when the bytes are not a certificate.
pub(crate) fn parse_certificate(der: &[u8]) -> Option<CertificateDetails> {
    match x509_parser::parse_x509_certificate(der) {
        Ok((_, cert)) => {
            let tbs_cert = &cert.tbs_certificate;
            Some(CertificateDetails {
                subject: tbs_cert.subject.to_string(),
                issuer: tbs_cert.issuer.to_string(),
                not_after: DateTime::from_timestamp(tbs_cert.validity.not_after.timestamp(), 0),
            })
        }
        Err(e) => {
            log::debug!("Failed to parse peer certificate: {e}");
            None
        }
    }
}
