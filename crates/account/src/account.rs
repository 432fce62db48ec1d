//! Smart account composer

use crate::{
    calls::{decode_calls, encode_calls},
    entry_point::EntryPoint,
    error::AccountError,
    gen::ModularAccountAPI,
};
use ethers::{
    providers::Middleware,
    types::{transaction::eip712::TypedData, Address, Bytes, U256},
};
use futures::future::BoxFuture;
use silex_primitives::{
    constants::entry_point, pack_factory_data, Call, ExecutionMode, UserOperation,
    UserOperationRequest,
};
use silex_signers::SmartAccountSigner;
use std::{fmt, sync::Arc};
use tracing::debug;

/// Resolves the account address (deployed or counterfactual)
pub type AddressResolverFn =
    Box<dyn Fn() -> BoxFuture<'static, eyre::Result<Address>> + Send + Sync>;

/// Resolves the factory args for first-use deployment; `None` once the
/// account is deployed
pub type FactoryArgsResolverFn =
    Box<dyn Fn() -> BoxFuture<'static, eyre::Result<Option<FactoryArgs>>> + Send + Sync>;

/// Factory address and calldata deploying the account on first use
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactoryArgs {
    /// Account factory address
    pub factory: Address,
    /// Calldata passed to the factory
    pub factory_data: Bytes,
}

/// Smart account façade binding a network client, a signature scheme
/// provider, and the caller-supplied resolvers
///
/// The composer holds no mutable state: every operation derives its result
/// from the client, the signer, and the resolvers it was built with.
pub struct SmartAccount<M, S>
where
    M: Middleware + 'static,
    S: SmartAccountSigner,
{
    eth_client: Arc<M>,
    entry_point: EntryPoint<M>,
    signer: S,
    address_resolver: AddressResolverFn,
    factory_args_resolver: FactoryArgsResolverFn,
    stub_signature_override: Option<Bytes>,
}

impl<M, S> fmt::Debug for SmartAccount<M, S>
where
    M: Middleware + 'static,
    S: SmartAccountSigner,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartAccount")
            .field("entry_point", &self.entry_point.address())
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl<M, S> SmartAccount<M, S>
where
    M: Middleware + 'static,
    S: SmartAccountSigner,
{
    /// Creates a smart account bound to the default entry point
    pub fn new(
        eth_client: Arc<M>,
        signer: S,
        address_resolver: AddressResolverFn,
        factory_args_resolver: FactoryArgsResolverFn,
    ) -> Self {
        let address: Address =
            entry_point::ADDRESS.parse().expect("entry point address is valid");
        Self {
            entry_point: EntryPoint::new(eth_client.clone(), address),
            eth_client,
            signer,
            address_resolver,
            factory_args_resolver,
            stub_signature_override: None,
        }
    }

    /// Binds a different entry point contract
    pub fn with_entry_point(mut self, address: Address) -> Self {
        self.entry_point = EntryPoint::new(self.eth_client.clone(), address);
        self
    }

    /// Overrides the stub signature of the active signer
    pub fn with_stub_signature(mut self, stub_signature: Bytes) -> Self {
        self.stub_signature_override = Some(stub_signature);
        self
    }

    /// The bound entry point
    pub fn entry_point(&self) -> &EntryPoint<M> {
        &self.entry_point
    }

    /// The active signature scheme provider
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Chain id as reported by the network client
    pub async fn chain_id(&self) -> Result<U256, AccountError> {
        self.eth_client
            .get_chainid()
            .await
            .map_err(|e| AccountError::Provider { inner: e.to_string() })
    }

    /// Resolves the account address (deployed or counterfactual)
    pub async fn get_address(&self) -> Result<Address, AccountError> {
        (self.address_resolver)().await.map_err(AccountError::Resolver)
    }

    /// Resolves the factory args; `None` once the account is deployed
    pub async fn get_factory_args(&self) -> Result<Option<FactoryArgs>, AccountError> {
        (self.factory_args_resolver)().await.map_err(AccountError::Resolver)
    }

    /// Init code for the user operation; empty once the account is deployed
    pub async fn get_init_code(&self) -> Result<Bytes, AccountError> {
        Ok(match self.get_factory_args().await? {
            Some(args) => pack_factory_data(args.factory, &args.factory_data),
            None => Bytes::default(),
        })
    }

    /// Reads the account's nonce for the given 192-bit key namespace from
    /// the entry point
    pub async fn get_nonce(&self, key: U256) -> Result<U256, AccountError> {
        let sender = self.get_address().await?;
        let nonce = self.entry_point.get_nonce(&sender, key).await?;
        debug!("nonce of {sender:?} for key {key}: {nonce}");
        Ok(nonce)
    }

    /// Encodes calls into `execute` calldata
    pub fn encode_calls(&self, calls: &[Call]) -> Result<Bytes, AccountError> {
        Ok(encode_calls(calls)?)
    }

    /// Decodes `execute` calldata back into calls
    pub fn decode_calls(&self, calldata: &[u8]) -> Result<Vec<Call>, AccountError> {
        Ok(decode_calls(calldata)?)
    }

    /// Placeholder signature used for gas estimation
    pub fn stub_signature(&self) -> Bytes {
        self.stub_signature_override
            .clone()
            .unwrap_or_else(|| self.signer.stub_signature())
    }

    /// Signs the message with the active signer
    pub async fn sign_message(&self, msg: &[u8]) -> Result<Bytes, AccountError> {
        Ok(self.signer.sign_message(msg).await?)
    }

    /// Signs EIP-712 typed data with the active signer
    pub async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Bytes, AccountError> {
        Ok(self.signer.sign_typed_data(typed_data).await?)
    }

    /// Signs the user operation
    ///
    /// The sender defaults to the resolved account address; the chain id
    /// must be present on the request. The operation hash goes through the
    /// signer's message path: the account contract verifies an EIP-191
    /// wrapped hash, not the raw digest.
    pub async fn sign_user_operation(
        &self,
        request: UserOperationRequest,
    ) -> Result<UserOperation, AccountError> {
        let chain_id =
            request.chain_id.ok_or(AccountError::MissingField { field: "chainId" })?;
        let sender = match request.sender {
            Some(sender) => sender,
            None => self.get_address().await?,
        };
        let uo = UserOperation::from(request).sender(sender);
        let hash = uo.hash(&self.entry_point.address(), chain_id.as_u64());
        debug!("signing user operation {:?} of {sender:?}", hash.0);
        let signature = self.signer.sign_message(hash.as_bytes()).await?;
        Ok(uo.signature(signature))
    }

    /// Queries the deployed account's ERC-7579 account identifier
    pub async fn account_id(&self) -> Result<String, AccountError> {
        let account = self.account_api().await?;
        account.account_id().call().await.map_err(AccountError::from_contract_error)
    }

    /// Checks whether the deployed account supports the given execution mode
    pub async fn supports_execution_mode(
        &self,
        mode: ExecutionMode,
    ) -> Result<bool, AccountError> {
        let account = self.account_api().await?;
        account
            .supports_execution_mode(mode.encode().0)
            .call()
            .await
            .map_err(AccountError::from_contract_error)
    }

    /// Checks whether a module of the given type is installed on the
    /// deployed account
    pub async fn is_module_installed(
        &self,
        module_type: u64,
        module: Address,
        additional_context: Bytes,
    ) -> Result<bool, AccountError> {
        let account = self.account_api().await?;
        account
            .is_module_installed(module_type.into(), module, additional_context)
            .call()
            .await
            .map_err(AccountError::from_contract_error)
    }

    async fn account_api(&self) -> Result<ModularAccountAPI<M>, AccountError> {
        let sender = self.get_address().await?;
        Ok(ModularAccountAPI::new(sender, self.eth_client.clone()))
    }
}
