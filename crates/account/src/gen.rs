use ethers::contract::abigen;
use silex_primitives::UserOperation;

abigen!(
    EntryPointAPI,
    r#"[
        struct PackedUserOperation {address sender;uint256 nonce;bytes initCode;bytes callData;bytes32 accountGasLimits;uint256 preVerificationGas;bytes32 gasFees;bytes paymasterAndData;bytes signature;}
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
        function balanceOf(address account) external view returns (uint256)
        function getUserOpHash(PackedUserOperation calldata userOp) external view returns (bytes32)
        function handleOps(PackedUserOperation[] calldata ops,address payable beneficiary) external
        function depositTo(address account) external payable
    ]"#
);

abigen!(
    ModularAccountAPI,
    r#"[
        function execute(bytes32 mode, bytes calldata executionCalldata) external payable
        function executeFromExecutor(bytes32 mode, bytes calldata executionCalldata) external payable returns (bytes[] memory returnData)
        function accountId() external view returns (string memory accountImplementationId)
        function supportsExecutionMode(bytes32 encodedMode) external view returns (bool)
        function supportsModule(uint256 moduleTypeId) external view returns (bool)
        function isModuleInstalled(uint256 moduleTypeId, address module, bytes calldata additionalContext) external view returns (bool)
    ]"#
);

impl From<UserOperation> for PackedUserOperation {
    fn from(uo: UserOperation) -> Self {
        Self {
            sender: uo.sender,
            nonce: uo.nonce,
            init_code: uo.init_code,
            call_data: uo.call_data,
            account_gas_limits: uo.account_gas_limits.0,
            pre_verification_gas: uo.pre_verification_gas,
            gas_fees: uo.gas_fees.0,
            paymaster_and_data: uo.paymaster_and_data,
            signature: uo.signature,
        }
    }
}
