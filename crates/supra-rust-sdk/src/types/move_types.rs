//! Move identifiers and type tags.
//!
//! All parsers enforce length and nesting limits. Addresses inside these
//! strings are user-facing (`0x1::coin::transfer`), so they are parsed with
//! left-padding rather than strict 64-character validation.

use crate::error::{SupraError, SupraResult};
use crate::types::AccountAddress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_TYPE_TAG_LENGTH: usize = 1024;
const MAX_IDENTIFIER_LENGTH: usize = 128;
const MAX_TYPE_NESTING_DEPTH: usize = 8;

/// An identifier in Move (module name, function name, struct name).
///
/// Identifiers start with a letter or underscore and contain only ASCII
/// alphanumerics and underscores.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Creates a new identifier, validating the format.
    pub fn new(s: impl Into<String>) -> SupraResult<Self> {
        let s = s.into();
        if s.len() > MAX_IDENTIFIER_LENGTH {
            return Err(SupraError::InvalidTypeTag(format!(
                "identifier too long: {} bytes (max {})",
                s.len(),
                MAX_IDENTIFIER_LENGTH
            )));
        }
        let Some(first) = s.chars().next() else {
            return Err(SupraError::InvalidTypeTag(
                "identifier cannot be empty".into(),
            ));
        };
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(SupraError::InvalidTypeTag(format!(
                "identifier must start with letter or underscore: {s}"
            )));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(SupraError::InvalidTypeTag(format!(
                "identifier contains invalid characters: {s}"
            )));
        }
        Ok(Self(s))
    }

    pub(crate) fn from_static(s: &'static str) -> Self {
        Self(s.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = SupraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A Move module identifier (`address::module_name`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveModuleId {
    /// The address where the module is published.
    pub address: AccountAddress,
    /// The name of the module.
    pub name: Identifier,
}

impl MoveModuleId {
    /// Creates a new module ID.
    pub fn new(address: AccountAddress, name: Identifier) -> Self {
        Self { address, name }
    }

    /// Parses a module ID such as `0x1::coin`.
    pub fn from_str_strict(s: &str) -> SupraResult<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        if parts.len() != 2 {
            return Err(SupraError::InvalidTypeTag(format!(
                "invalid module ID format: {s}"
            )));
        }
        let address = AccountAddress::from_hex_padded(parts[0])?;
        let name = Identifier::new(parts[1])?;
        Ok(Self { address, name })
    }
}

impl fmt::Display for MoveModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_short_string(), self.name)
    }
}

impl FromStr for MoveModuleId {
    type Err = SupraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_strict(s)
    }
}

/// A struct tag identifies a concrete struct type.
///
/// Format: `address::module::StructName<TypeArg1, TypeArg2, ...>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    /// The address where the module is published.
    pub address: AccountAddress,
    /// The module name.
    pub module: Identifier,
    /// The struct name.
    pub name: Identifier,
    /// Type arguments (for generic structs).
    #[serde(default)]
    pub type_args: Vec<TypeTag>,
}

impl StructTag {
    /// Creates a new struct tag.
    pub fn new(
        address: AccountAddress,
        module: Identifier,
        name: Identifier,
        type_args: Vec<TypeTag>,
    ) -> Self {
        Self {
            address,
            module,
            name,
            type_args,
        }
    }

    /// The native coin struct tag (`0x1::supra_coin::SupraCoin`).
    pub fn supra_coin() -> Self {
        Self {
            address: AccountAddress::ONE,
            module: Identifier::from_static("supra_coin"),
            name: Identifier::from_static("SupraCoin"),
            type_args: vec![],
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_short_string(),
            self.module,
            self.name
        )?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// A type tag represents a Move type.
///
/// Variant order is the canonical encoding order and must not change:
/// bool, u8, u64, u128, address, signer, vector, struct, u16, u32, u256.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Boolean type
    Bool,
    /// 8-bit unsigned integer
    U8,
    /// 64-bit unsigned integer
    U64,
    /// 128-bit unsigned integer
    U128,
    /// Address type
    Address,
    /// Signer type
    Signer,
    /// Vector type with element type
    Vector(Box<TypeTag>),
    /// Struct type
    Struct(Box<StructTag>),
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 256-bit unsigned integer
    U256,
}

impl TypeTag {
    /// Creates a vector type tag with the given element type.
    pub fn vector(element: TypeTag) -> Self {
        Self::Vector(Box::new(element))
    }

    /// Returns the native coin type tag.
    pub fn supra_coin() -> Self {
        Self::Struct(Box::new(StructTag::supra_coin()))
    }

    /// Parses a type tag such as `u64`, `vector<u8>` or
    /// `0x1::coin::CoinStore<0x1::supra_coin::SupraCoin>`.
    ///
    /// ```rust
    /// use supra_rust_sdk::types::TypeTag;
    ///
    /// let tag = TypeTag::from_str_strict("0x1::supra_coin::SupraCoin").unwrap();
    /// assert_eq!(tag, TypeTag::supra_coin());
    /// assert!(TypeTag::from_str_strict("vector<u8>").is_ok());
    /// ```
    pub fn from_str_strict(s: &str) -> SupraResult<Self> {
        let s = s.trim();
        if s.len() > MAX_TYPE_TAG_LENGTH {
            return Err(SupraError::InvalidTypeTag(format!(
                "type tag too long: {} bytes (max {})",
                s.len(),
                MAX_TYPE_TAG_LENGTH
            )));
        }
        Self::parse_with_depth(s, 0)
    }

    fn parse_with_depth(s: &str, depth: usize) -> SupraResult<Self> {
        if depth > MAX_TYPE_NESTING_DEPTH {
            return Err(SupraError::InvalidTypeTag(format!(
                "type tag nesting too deep: {depth} levels (max {MAX_TYPE_NESTING_DEPTH})"
            )));
        }

        match s {
            "bool" => return Ok(TypeTag::Bool),
            "u8" => return Ok(TypeTag::U8),
            "u16" => return Ok(TypeTag::U16),
            "u32" => return Ok(TypeTag::U32),
            "u64" => return Ok(TypeTag::U64),
            "u128" => return Ok(TypeTag::U128),
            "u256" => return Ok(TypeTag::U256),
            "address" => return Ok(TypeTag::Address),
            "signer" => return Ok(TypeTag::Signer),
            _ => {}
        }

        if let Some(inner) = s.strip_prefix("vector<").and_then(|r| r.strip_suffix('>')) {
            return Ok(TypeTag::vector(Self::parse_with_depth(inner.trim(), depth + 1)?));
        }

        Self::parse_struct_with_depth(s, depth)
    }

    fn parse_struct_with_depth(s: &str, depth: usize) -> SupraResult<Self> {
        let (base, type_args_str) = match s.find('<') {
            Some(idx) => {
                if !s.ends_with('>') {
                    return Err(SupraError::InvalidTypeTag(format!(
                        "malformed generic type: {s}"
                    )));
                }
                (&s[..idx], Some(&s[idx + 1..s.len() - 1]))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = base.split("::").collect();
        if parts.len() != 3 {
            return Err(SupraError::InvalidTypeTag(format!(
                "invalid struct type format (expected address::module::name): {s}"
            )));
        }

        let address = AccountAddress::from_hex_padded(parts[0])
            .map_err(|e| SupraError::InvalidTypeTag(format!("{s}: {e}")))?;
        let module = Identifier::new(parts[1])?;
        let name = Identifier::new(parts[2])?;
        let type_args = match type_args_str {
            Some(args) => Self::parse_args_with_depth(args, depth)?,
            None => vec![],
        };

        Ok(TypeTag::Struct(Box::new(StructTag {
            address,
            module,
            name,
            type_args,
        })))
    }

    fn parse_args_with_depth(s: &str, depth: usize) -> SupraResult<Vec<TypeTag>> {
        let mut result = Vec::new();
        let mut bracket_depth = 0i32;
        let mut start = 0;

        for (i, c) in s.char_indices() {
            match c {
                '<' => bracket_depth += 1,
                '>' => bracket_depth -= 1,
                ',' if bracket_depth == 0 => {
                    let arg = s[start..i].trim();
                    if !arg.is_empty() {
                        result.push(Self::parse_with_depth(arg, depth + 1)?);
                    }
                    start = i + 1;
                }
                _ => {}
            }
        }

        let last = s[start..].trim();
        if !last.is_empty() {
            result.push(Self::parse_with_depth(last, depth + 1)?);
        }
        Ok(result)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeTag::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for TypeTag {
    type Err = SupraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_strict(s)
    }
}

/// An entry function identifier (`address::module::function`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryFunctionId {
    /// The module containing the function.
    pub module: MoveModuleId,
    /// The function name.
    pub name: Identifier,
}

impl EntryFunctionId {
    /// Creates a new entry function ID.
    pub fn new(module: MoveModuleId, name: Identifier) -> Self {
        Self { module, name }
    }

    /// Parses an entry function ID such as `0x1::supra_account::transfer`.
    pub fn from_str_strict(s: &str) -> SupraResult<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        if parts.len() != 3 {
            return Err(SupraError::InvalidTypeTag(format!(
                "invalid entry function ID format: {s}"
            )));
        }
        let address = AccountAddress::from_hex_padded(parts[0])?;
        let module = Identifier::new(parts[1])?;
        let name = Identifier::new(parts[2])?;
        Ok(Self {
            module: MoveModuleId::new(address, module),
            name,
        })
    }
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

impl FromStr for EntryFunctionId {
    type Err = SupraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_strict(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert!(Identifier::new("transfer").is_ok());
        assert!(Identifier::new("_private").is_ok());
        assert!(Identifier::new("").is_err());
        assert!(Identifier::new("1abc").is_err());
        assert!(Identifier::new("has-dash").is_err());
        assert!(Identifier::new("a".repeat(129)).is_err());
    }

    #[test]
    fn test_module_id() {
        let id = MoveModuleId::from_str_strict("0x1::coin").unwrap();
        assert_eq!(id.address, AccountAddress::ONE);
        assert_eq!(id.name.as_str(), "coin");
        assert_eq!(id.to_string(), "0x1::coin");
        assert!(MoveModuleId::from_str_strict("0x1").is_err());
        assert!(MoveModuleId::from_str_strict("0x1::a::b").is_err());
    }

    #[test]
    fn test_type_tag_primitives() {
        assert_eq!(TypeTag::from_str_strict("u64").unwrap(), TypeTag::U64);
        assert_eq!(TypeTag::from_str_strict(" bool ").unwrap(), TypeTag::Bool);
        assert_eq!(
            TypeTag::from_str_strict("vector<u8>").unwrap(),
            TypeTag::vector(TypeTag::U8)
        );
    }

    #[test]
    fn test_type_tag_generic_struct() {
        let tag =
            TypeTag::from_str_strict("0x1::coin::CoinStore<0x1::supra_coin::SupraCoin>").unwrap();
        let TypeTag::Struct(s) = &tag else {
            panic!("expected struct tag");
        };
        assert_eq!(s.module.as_str(), "coin");
        assert_eq!(s.type_args, vec![TypeTag::supra_coin()]);
        assert_eq!(
            tag.to_string(),
            "0x1::coin::CoinStore<0x1::supra_coin::SupraCoin>"
        );
    }

    #[test]
    fn test_type_tag_multiple_args() {
        let tag = TypeTag::from_str_strict("0x1::pair::Pair<u8, vector<u64>>").unwrap();
        let TypeTag::Struct(s) = tag else {
            panic!("expected struct tag");
        };
        assert_eq!(s.type_args, vec![TypeTag::U8, TypeTag::vector(TypeTag::U64)]);
    }

    #[test]
    fn test_type_tag_invalid() {
        assert!(TypeTag::from_str_strict("notatype").is_err());
        assert!(TypeTag::from_str_strict("0x1::coin::Coin<u8").is_err());
        let deep = format!("{}u8{}", "vector<".repeat(10), ">".repeat(10));
        assert!(TypeTag::from_str_strict(&deep).is_err());
    }

    #[test]
    fn test_type_tag_bcs_discriminants() {
        assert_eq!(bcs::to_bytes(&TypeTag::U64).unwrap(), vec![2]);
        assert_eq!(bcs::to_bytes(&TypeTag::U16).unwrap(), vec![8]);
        assert_eq!(bcs::to_bytes(&TypeTag::vector(TypeTag::U8)).unwrap(), vec![6, 1]);
    }

    #[test]
    fn test_type_tag_json_form() {
        assert_eq!(serde_json::to_value(TypeTag::U64).unwrap(), "u64");
        let json = serde_json::to_value(TypeTag::supra_coin()).unwrap();
        assert_eq!(json["struct"]["module"], "supra_coin");
        assert_eq!(json["struct"]["name"], "SupraCoin");
    }

    #[test]
    fn test_entry_function_id() {
        let id = EntryFunctionId::from_str_strict("0x1::supra_account::transfer").unwrap();
        assert_eq!(id.module.name.as_str(), "supra_account");
        assert_eq!(id.name.as_str(), "transfer");
        assert_eq!(id.to_string(), "0x1::supra_account::transfer");
        assert!(EntryFunctionId::from_str_strict("0x1::transfer").is_err());
    }
}
