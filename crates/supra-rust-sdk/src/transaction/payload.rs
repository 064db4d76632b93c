//! Transaction payloads.
//!
//! [`TransactionPayload`] is a closed union of the four call shapes a Supra
//! transaction can carry. Its canonical discriminants are fixed by the chain:
//! script = 0, entry function = 2, multisig = 3, automation registration = 4.
//! Index 1 belonged to module bundles, which the chain no longer accepts; it
//! is reserved on the wire and rejected on decode.

use crate::error::{SupraError, SupraResult};
use crate::transaction::encoding;
use crate::types::{AccountAddress, EntryFunctionId, Identifier, MoveModuleId, TypeTag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Function called by a native coin transfer.
pub const SUPRA_TRANSFER_FUNCTION: &str = "0x1::supra_account::transfer";
/// Generic coin transfer through the account module.
pub const SUPRA_TRANSFER_COINS_FUNCTION: &str = "0x1::supra_account::transfer_coins";
/// Generic coin transfer through the coin module.
pub const COIN_TRANSFER_FUNCTION: &str = "0x1::coin::transfer";

/// The payload of a transaction, specifying what action to take.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PayloadRepr", try_from = "PayloadRepr")]
pub enum TransactionPayload {
    /// Execute a script with bytecode.
    Script(Script),
    /// Call an entry function on a module.
    EntryFunction(EntryFunction),
    /// Execute a call on behalf of an on-chain multisig account.
    Multisig(Multisig),
    /// Register an entry function for automated execution.
    AutomationRegistration(AutomationRegistrationParams),
}

impl TransactionPayload {
    /// Wraps `call` for execution by `multisig_address`.
    ///
    /// Building a multisig payload from this API requires the inner call;
    /// `None` is rejected with [`SupraError::InvalidPayload`]. Use
    /// [`TransactionPayload::multisig_stored`] to execute a call the
    /// multisig account already holds on chain.
    pub fn multisig(
        multisig_address: AccountAddress,
        call: Option<EntryFunction>,
    ) -> SupraResult<Self> {
        let call = call.ok_or_else(|| {
            SupraError::invalid_payload(format!(
                "multisig payload for {multisig_address} has no inner entry function"
            ))
        })?;
        Ok(Self::Multisig(Multisig {
            multisig_address,
            transaction_payload: Some(MultisigTransactionPayload::EntryFunction(call)),
        }))
    }

    /// Executes the call already stored by the multisig account.
    pub fn multisig_stored(multisig_address: AccountAddress) -> Self {
        Self::Multisig(Multisig {
            multisig_address,
            transaction_payload: None,
        })
    }

    /// Short name of the active variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Script(_) => "script",
            Self::EntryFunction(_) => "entry_function",
            Self::Multisig(_) => "multisig",
            Self::AutomationRegistration(_) => "automation_registration",
        }
    }
}

/// A script payload with inline bytecode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// The Move bytecode to execute.
    #[serde(with = "serde_bytes")]
    pub code: Vec<u8>,
    /// Type arguments for the script.
    #[serde(rename = "ty_args")]
    pub type_args: Vec<TypeTag>,
    /// Arguments to the script.
    pub args: Vec<ScriptArgument>,
}

impl Script {
    /// Creates a new script payload.
    pub fn new(code: Vec<u8>, type_args: Vec<TypeTag>, args: Vec<ScriptArgument>) -> Self {
        Self {
            code,
            type_args,
            args,
        }
    }
}

/// A typed script argument.
///
/// Variant order is the canonical encoding order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptArgument {
    /// A u8 value.
    U8(u8),
    /// A u64 value.
    U64(u64),
    /// A u128 value.
    U128(u128),
    /// An address value.
    Address(AccountAddress),
    /// A vector of u8 (bytes).
    U8Vector(#[serde(with = "serde_bytes")] Vec<u8>),
    /// A boolean value.
    Bool(bool),
    /// A u16 value.
    U16(u16),
    /// A u32 value.
    U32(u32),
    /// A u256 value, little-endian.
    U256([u8; 32]),
}

/// An entry function call payload.
///
/// Arguments are already canonically encoded; the payload never looks inside
/// them.
///
/// ```rust
/// use supra_rust_sdk::transaction::EntryFunction;
/// use supra_rust_sdk::types::{AccountAddress, TypeTag};
///
/// let recipient = AccountAddress::from_hex_padded("0x123").unwrap();
/// let call = EntryFunction::coin_transfer(TypeTag::supra_coin(), recipient, 1000).unwrap();
/// assert_eq!(call.function_id(), "0x1::supra_account::transfer_coins");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunction {
    /// The module containing the function.
    pub module: MoveModuleId,
    /// The function name.
    pub function: Identifier,
    /// Type arguments for generic functions.
    #[serde(rename = "ty_args")]
    pub type_args: Vec<TypeTag>,
    /// Canonically encoded arguments.
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    /// Creates a new entry function payload.
    pub fn new(
        module: MoveModuleId,
        function: Identifier,
        type_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            module,
            function,
            type_args,
            args,
        }
    }

    /// Creates an entry function from its separate parts.
    ///
    /// `module_address` may be short (`0x1`); it is left-padded. Malformed
    /// addresses fail with [`SupraError::InvalidAddress`], malformed names
    /// with [`SupraError::InvalidTypeTag`].
    pub fn from_parts(
        module_address: &str,
        module_name: &str,
        function_name: &str,
        type_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> SupraResult<Self> {
        let address = AccountAddress::from_hex_padded(module_address)?;
        Ok(Self::new(
            MoveModuleId::new(address, Identifier::new(module_name)?),
            Identifier::new(function_name)?,
            type_args,
            args,
        ))
    }

    /// Creates an entry function from a string such as `0x1::coin::transfer`.
    pub fn from_function_id(
        function_id: &str,
        type_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> SupraResult<Self> {
        let id = EntryFunctionId::from_str_strict(function_id)?;
        Ok(Self::new(id.module, id.name, type_args, args))
    }

    /// Native coin transfer (`0x1::supra_account::transfer`).
    pub fn supra_transfer(recipient: AccountAddress, amount: u64) -> SupraResult<Self> {
        Self::from_function_id(
            SUPRA_TRANSFER_FUNCTION,
            vec![],
            vec![encoding::encode(&recipient)?, encoding::encode(&amount)?],
        )
    }

    /// Transfer of any coin type (`0x1::supra_account::transfer_coins<T>`).
    pub fn coin_transfer(
        coin_type: TypeTag,
        recipient: AccountAddress,
        amount: u64,
    ) -> SupraResult<Self> {
        Self::from_function_id(
            SUPRA_TRANSFER_COINS_FUNCTION,
            vec![coin_type],
            vec![encoding::encode(&recipient)?, encoding::encode(&amount)?],
        )
    }

    /// Returns the function identifier as `0x1::module::function`.
    pub fn function_id(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }

    /// Returns true when this call targets the given function identifier.
    pub fn is_function(&self, function_id: &str) -> bool {
        EntryFunctionId::from_str_strict(function_id)
            .map(|id| id.module == self.module && id.name == self.function)
            .unwrap_or(false)
    }
}

impl fmt::Display for EntryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.function_id())
    }
}

/// A call executed on behalf of a multisig account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multisig {
    /// The multisig account the call runs as.
    pub multisig_address: AccountAddress,
    /// The call, or `None` to run the payload stored on chain.
    pub transaction_payload: Option<MultisigTransactionPayload>,
}

/// The inner call of a multisig payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultisigTransactionPayload {
    /// An entry function call.
    EntryFunction(EntryFunction),
}

/// Registration of an entry function for automated execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomationRegistrationParams {
    /// Version 1 of the registration parameters.
    V1(AutomationRegistrationParamsV1),
}

impl AutomationRegistrationParams {
    /// Returns the automated call.
    pub fn automated_function(&self) -> &EntryFunction {
        match self {
            Self::V1(params) => &params.automated_function,
        }
    }
}

/// Registration parameters, version 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRegistrationParamsV1 {
    /// The entry function to run on each trigger.
    pub automated_function: EntryFunction,
    /// Gas budget of each automated execution.
    pub max_gas_amount: u64,
    /// Highest gas price the task accepts.
    pub gas_price_cap: u64,
    /// Upper bound on automation fees charged per epoch.
    pub automation_fee_cap_for_epoch: u64,
    /// When the registration lapses, in seconds since the Unix epoch.
    pub expiration_timestamp_secs: u64,
    /// Opaque auxiliary data passed through to the automation registry.
    pub aux_data: Vec<Vec<u8>>,
}

impl From<EntryFunction> for TransactionPayload {
    fn from(entry_function: EntryFunction) -> Self {
        TransactionPayload::EntryFunction(entry_function)
    }
}

impl From<Script> for TransactionPayload {
    fn from(script: Script) -> Self {
        TransactionPayload::Script(script)
    }
}

impl From<AutomationRegistrationParams> for TransactionPayload {
    fn from(params: AutomationRegistrationParams) -> Self {
        TransactionPayload::AutomationRegistration(params)
    }
}

/// Placeholder for the retired module-bundle discriminant.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RetiredModuleBundle;

/// Wire mirror of [`TransactionPayload`] keeping the retired index in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
enum PayloadRepr {
    Script(Script),
    ModuleBundle(RetiredModuleBundle),
    EntryFunction(EntryFunction),
    Multisig(Multisig),
    AutomationRegistration(AutomationRegistrationParams),
}

impl From<TransactionPayload> for PayloadRepr {
    fn from(payload: TransactionPayload) -> Self {
        match payload {
            TransactionPayload::Script(s) => Self::Script(s),
            TransactionPayload::EntryFunction(f) => Self::EntryFunction(f),
            TransactionPayload::Multisig(m) => Self::Multisig(m),
            TransactionPayload::AutomationRegistration(a) => Self::AutomationRegistration(a),
        }
    }
}

impl TryFrom<PayloadRepr> for TransactionPayload {
    type Error = String;

    fn try_from(repr: PayloadRepr) -> Result<Self, Self::Error> {
        match repr {
            PayloadRepr::Script(s) => Ok(Self::Script(s)),
            PayloadRepr::EntryFunction(f) => Ok(Self::EntryFunction(f)),
            PayloadRepr::Multisig(m) => Ok(Self::Multisig(m)),
            PayloadRepr::AutomationRegistration(a) => Ok(Self::AutomationRegistration(a)),
            PayloadRepr::ModuleBundle(_) => {
                Err("module bundle payloads are no longer supported".to_string())
            }
        }
    }
}
