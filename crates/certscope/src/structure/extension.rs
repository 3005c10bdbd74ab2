//! Lossy stringification of X.509v3 extensions.

use std::net::{Ipv4Addr, Ipv6Addr};

use certscope_core::ExtensionSummary;
use x509_parser::extensions::{
    ExtendedKeyUsage, GeneralName, KeyUsage, ParsedExtension, X509Extension,
};

use super::registered_name;

pub(crate) fn summarize(ext: &X509Extension<'_>) -> ExtensionSummary {
    let oid = ext.oid.to_id_string();
    let name = registered_name(&ext.oid).unwrap_or_else(|| oid.clone());
    let value = render(ext.parsed_extension()).unwrap_or_else(|| hex::encode_upper(ext.value));

    ExtensionSummary {
        oid,
        name,
        critical: ext.critical,
        value,
    }
}

fn render(parsed: &ParsedExtension<'_>) -> Option<String> {
    match parsed {
        ParsedExtension::SubjectAlternativeName(san) => Some(general_names(&san.general_names)),
        ParsedExtension::IssuerAlternativeName(ian) => Some(general_names(&ian.general_names)),
        ParsedExtension::BasicConstraints(bc) => {
            let ca = if bc.ca { "TRUE" } else { "FALSE" };
            Some(match bc.path_len_constraint {
                Some(len) => format!("CA:{ca}, pathlen:{len}"),
                None => format!("CA:{ca}"),
            })
        }
        ParsedExtension::KeyUsage(ku) => Some(key_usage(ku)),
        ParsedExtension::ExtendedKeyUsage(eku) => Some(extended_key_usage(eku)),
        ParsedExtension::SubjectKeyIdentifier(kid) => Some(colon_hex(kid.0)),
        ParsedExtension::AuthorityKeyIdentifier(aki) => aki
            .key_identifier
            .as_ref()
            .map(|kid| format!("keyid:{}", colon_hex(kid.0))),
        _ => None,
    }
}

fn general_names(names: &[GeneralName<'_>]) -> String {
    names
        .iter()
        .map(|name| match name {
            GeneralName::DNSName(dns) => format!("DNS:{dns}"),
            GeneralName::RFC822Name(email) => format!("email:{email}"),
            GeneralName::URI(uri) => format!("URI:{uri}"),
            GeneralName::IPAddress(ip) => format!("IP:{}", ip_address(ip)),
            GeneralName::DirectoryName(dn) => format!("DirName:{dn}"),
            GeneralName::RegisteredID(oid) => format!("RID:{}", oid.to_id_string()),
            _ => "othername:<unsupported>".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn ip_address(bytes: &[u8]) -> String {
    if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
        Ipv4Addr::from(v4).to_string()
    } else if let Ok(v6) = <[u8; 16]>::try_from(bytes) {
        Ipv6Addr::from(v6).to_string()
    } else {
        colon_hex(bytes)
    }
}

fn key_usage(ku: &KeyUsage) -> String {
    let flags = [
        (ku.digital_signature(), "Digital Signature"),
        (ku.non_repudiation(), "Non Repudiation"),
        (ku.key_encipherment(), "Key Encipherment"),
        (ku.data_encipherment(), "Data Encipherment"),
        (ku.key_agreement(), "Key Agreement"),
        (ku.key_cert_sign(), "Certificate Sign"),
        (ku.crl_sign(), "CRL Sign"),
        (ku.encipher_only(), "Encipher Only"),
        (ku.decipher_only(), "Decipher Only"),
    ];
    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(", ")
}

fn extended_key_usage(eku: &ExtendedKeyUsage<'_>) -> String {
    let flags = [
        (eku.any, "Any Extended Key Usage"),
        (eku.server_auth, "TLS Web Server Authentication"),
        (eku.client_auth, "TLS Web Client Authentication"),
        (eku.code_signing, "Code Signing"),
        (eku.email_protection, "E-mail Protection"),
        (eku.time_stamping, "Time Stamping"),
        (eku.ocsp_signing, "OCSP Signing"),
    ];
    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, label)| (*label).to_string())
        .chain(eku.other.iter().map(|oid| oid.to_id_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_addresses() {
        assert_eq!(ip_address(&[192, 0, 2, 1]), "192.0.2.1");
        let mut v6 = [0u8; 16];
        v6[15] = 1;
        assert_eq!(ip_address(&v6), "::1");
        assert_eq!(ip_address(&[1, 2, 3]), "01:02:03");
    }

    #[test]
    fn general_name_rendering() {
        let names = [
            GeneralName::DNSName("example.test"),
            GeneralName::RFC822Name("pki@example.test"),
            GeneralName::IPAddress(&[10, 0, 0, 1]),
        ];
        assert_eq!(
            general_names(&names),
            "DNS:example.test, email:pki@example.test, IP:10.0.0.1"
        );
    }
}
