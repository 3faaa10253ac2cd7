use sensewire_codec::ByteOrder;

/// Deployment-level settings the registry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    /// Byte order the deployment's sensor firmware emits records in.
    /// Applied to every multi-byte field of every record.
    pub byte_order: ByteOrder,
}

impl RegistryConfig {
    /// Config for a deployment with the given source byte order.
    pub fn with_byte_order(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }
}
