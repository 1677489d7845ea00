use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};

use super::Address;

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_ref())
    }
}

/// Accepted input shapes: `"user@domain"` or `{ "user": .., "domain": .. }`
#[derive(Deserialize)]
#[serde(untagged)]
enum AddressRepr {
    Serialized(String),
    Parts { user: String, domain: String },
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match AddressRepr::deserialize(deserializer)? {
            AddressRepr::Serialized(s) => Address::try_from(s).map_err(DeError::custom),
            AddressRepr::Parts { user, domain } => {
                Address::new(user, domain).map_err(DeError::custom)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_address_string() {
        let addr: Address = serde_json::from_str(r#""ab@bc.com""#).unwrap();
        assert_eq!(addr, "ab@bc.com".parse().unwrap());
    }

    #[test]
    fn parse_address_object() {
        let addr: Address =
            serde_json::from_str(r#"{ "user": "ab", "domain": "bc.com" }"#).unwrap();
        assert_eq!(addr, "ab@bc.com".parse().unwrap());
    }

    #[test]
    fn reject_invalid_address() {
        assert!(serde_json::from_str::<Address>(r#""not an address""#).is_err());
        assert!(serde_json::from_str::<Address>(r#"{ "user": "ab", "domain": "" }"#).is_err());
    }

    #[test]
    fn serialize_as_string() {
        let addr: Address = "a.b@c.org".parse().unwrap();
        assert_eq!(serde_json::to_string(&addr).unwrap(), r#""a.b@c.org""#);
    }
}
