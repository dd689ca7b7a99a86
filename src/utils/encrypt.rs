use base64::{engine::general_purpose, Engine as _};
use std::str::FromStr;

/// 数据库中密码的存储方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PasswordScheme {
    /// 明文存储 (现有数据的存储方式)
    #[default]
    Plain,
    /// bcrypt 哈希
    Bcrypt,
}

impl FromStr for PasswordScheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(PasswordScheme::Plain),
            "bcrypt" => Ok(PasswordScheme::Bcrypt),
            other => Err(format!("unknown password scheme `{}`", other)),
        }
    }
}

// 校验密码
pub fn verify_password(scheme: PasswordScheme, supplied: &str, stored: &str) -> bool {
    match scheme {
        PasswordScheme::Plain => supplied == stored,
        PasswordScheme::Bcrypt => match bcrypt::verify(supplied, stored) {
            Ok(matched) => matched,
            Err(err) => {
                tracing::error!("bcrypt verify failed, error:{}", err.to_string());
                false
            }
        },
    }
}

// base64 解码
pub fn base64_decode(data: &str) -> Result<String, String> {
    match general_purpose::STANDARD.decode(data.trim()) {
        Ok(decode_vec) => {
            if let Ok(decode_str) = String::from_utf8(decode_vec) {
                Ok(decode_str)
            } else {
                Err("base64 decode failed".to_string())
            }
        }
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_scheme_compares_exactly() {
        assert!(verify_password(PasswordScheme::Plain, "secret", "secret"));
        assert!(!verify_password(PasswordScheme::Plain, "secret", "Secret"));
    }

    #[test]
    fn bcrypt_scheme_checks_hash() {
        let hashed = bcrypt::hash("secret", 4).unwrap();
        assert!(verify_password(PasswordScheme::Bcrypt, "secret", &hashed));
        assert!(!verify_password(PasswordScheme::Bcrypt, "other", &hashed));
        // 明文的存储值不是合法哈希
        assert!(!verify_password(PasswordScheme::Bcrypt, "secret", "secret"));
    }

    #[test]
    fn scheme_parses_case_insensitive() {
        assert_eq!("BCRYPT".parse::<PasswordScheme>(), Ok(PasswordScheme::Bcrypt));
        assert!("md5".parse::<PasswordScheme>().is_err());
    }

    #[test]
    fn base64_decodes_utf8() {
        assert_eq!(base64_decode("aGVsbG8=\n"), Ok("hello".to_string()));
        assert!(base64_decode("***").is_err());
    }
}
