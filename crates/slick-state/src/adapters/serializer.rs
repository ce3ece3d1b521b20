use crate::domain::Account;
use crate::ports::{AccountSerializer, SerializationError};

/// Bincode encoding of [`Account`] records.
///
/// The enum tag is part of the encoding, so a record decoded from the wrong
/// key prefix is still recognised as its true kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeAccountSerializer;

impl AccountSerializer for BincodeAccountSerializer {
    fn serialize(&self, account: &Account) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(account).map_err(|e| SerializationError(e.to_string()))
    }

    fn deserialize(&self, data: &[u8]) -> Result<Account, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Authorship, Post};

    #[test]
    fn test_anonymous_post_survives_encoding() {
        let post = Account::Post(Post {
            community: Address([1; 32]),
            post_id: 3,
            content_uri: "ipfs://post".into(),
            content_hash: [9; 32],
            authorship: Authorship::Anonymous {
                pseudonym: "ghost".into(),
            },
            likes_count: 0,
            comments_count: 0,
            total_tip_lamports: 0,
            created_at: 42,
        });
        let serializer = BincodeAccountSerializer;

        let bytes = serializer.serialize(&post).unwrap();
        assert_eq!(serializer.deserialize(&bytes).unwrap(), post);
    }

    #[test]
    fn test_truncated_bytes_are_rejected() {
        assert!(BincodeAccountSerializer.deserialize(&[0xFF, 0x01]).is_err());
    }
}
