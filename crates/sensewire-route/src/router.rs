use sensewire_codec::{decode_record, Record};
use sensewire_schema::SchemaRegistry;
use tracing::debug;

use crate::error::{Result, RouteError};
use crate::topic::Topic;

/// A decoded message paired with its routing metadata, so the caller can
/// attribute the record to a node and site.
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub topic: Topic,
    pub record: Record,
}

/// Routes inbound (topic, payload) pairs to a schema and decodes them.
///
/// Owns the frozen registry; per call it touches only read-only state, so a
/// shared `Router` is safe to use from any number of inbound-message
/// handlers without locks.
pub struct Router {
    registry: SchemaRegistry,
}

impl Router {
    /// Freeze a registry into a router.
    pub fn new(registry: SchemaRegistry) -> Self {
        Self { registry }
    }

    /// The registry this router consults.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Route one message: parse the topic, look up the modality's layout,
    /// decode the payload.
    ///
    /// Errors carry enough structure for the caller to log and drop the
    /// message without disconnecting.
    pub fn route(&self, topic: &str, payload: &[u8]) -> Result<Inbound> {
        let topic = Topic::parse(topic)?;

        let schema = self
            .registry
            .lookup(&topic.modality)
            .ok_or_else(|| RouteError::UnknownModality {
                modality: topic.modality.clone(),
            })?;

        let record = decode_record(schema, self.registry.byte_order(), payload)?;
        debug!(topic = %topic, node = %topic.node_id, "routed record");

        Ok(Inbound { topic, record })
    }
}

#[cfg(test)]
mod tests {
    use sensewire_codec::{ByteOrder, CodecError, Reading};
    use sensewire_schema::{RegistryConfig, SchemaRegistry};

    use super::*;

    fn little_router() -> Router {
        Router::new(SchemaRegistry::new())
    }

    fn payload_le(timestamp: u32, value: f32) -> Vec<u8> {
        let mut payload = timestamp.to_le_bytes().to_vec();
        payload.extend_from_slice(&value.to_le_bytes());
        payload
    }

    #[test]
    fn routes_temperature_little_endian() {
        let inbound = little_router()
            .route(
                "/sns/siteA/node7/Temperature",
                &payload_le(1700000000, 23.5),
            )
            .unwrap();

        assert_eq!(inbound.topic.node_id, "node7");
        assert_eq!(inbound.topic.site, "siteA");
        assert_eq!(inbound.record.timestamp, 1700000000);
        assert_eq!(inbound.record.readings, vec![Reading::Float(23.5)]);
    }

    #[test]
    fn unknown_modality_is_reported_not_fatal() {
        let err = little_router()
            .route("/sns/siteA/node7/Pressure", &[0u8; 8])
            .unwrap_err();

        assert!(matches!(
            err,
            RouteError::UnknownModality { modality } if modality == "Pressure"
        ));
    }

    #[test]
    fn malformed_topic_is_reported() {
        let err = little_router().route("/bad", &[0u8; 8]).unwrap_err();
        assert!(matches!(err, RouteError::MalformedTopic { .. }));
    }

    #[test]
    fn size_mismatch_propagates_with_sizes() {
        let err = little_router()
            .route("/sns/siteA/node7/Temperature", &[0u8; 5])
            .unwrap_err();

        match err {
            RouteError::Codec(CodecError::SizeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 8);
                assert_eq!(actual, 5);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn location_routes_in_both_byte_orders() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let registry = SchemaRegistry::with_config(RegistryConfig::with_byte_order(order));
            let router = Router::new(registry);

            let mut payload = Vec::new();
            let (ts, lat, lon) = (1600000000u32, 1.333023f64, 103.740858f64);
            match order {
                ByteOrder::Little => {
                    payload.extend_from_slice(&ts.to_le_bytes());
                    payload.extend_from_slice(&lat.to_le_bytes());
                    payload.extend_from_slice(&lon.to_le_bytes());
                }
                ByteOrder::Big => {
                    payload.extend_from_slice(&ts.to_be_bytes());
                    payload.extend_from_slice(&lat.to_be_bytes());
                    payload.extend_from_slice(&lon.to_be_bytes());
                }
            }

            let inbound = router.route("/sns/jld_mobile/3/Location", &payload).unwrap();
            assert_eq!(inbound.record.timestamp, ts);
            assert_eq!(
                inbound.record.readings,
                vec![Reading::Double(lat), Reading::Double(lon)]
            );
        }
    }

    #[test]
    fn box_open_routes_five_byte_packet() {
        // One status byte after the timestamp; a 6-byte packet must fail.
        let router = little_router();
        let good = [77u32.to_le_bytes().as_slice(), &[1u8]].concat();
        let inbound = router.route("/sns/siteA/node2/BoxOpen", &good).unwrap();
        assert_eq!(inbound.record.readings, vec![Reading::Unsigned(1)]);

        let bad = [77u32.to_le_bytes().as_slice(), &[1u8, 0u8]].concat();
        assert!(matches!(
            router.route("/sns/siteA/node2/BoxOpen", &bad),
            Err(RouteError::Codec(CodecError::SizeMismatch { .. }))
        ));
    }

    #[test]
    fn shared_router_is_usable_across_threads() {
        use std::sync::Arc;

        let router = Arc::new(little_router());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let router = Arc::clone(&router);
                std::thread::spawn(move || {
                    let payload = payload_le(1700000000 + i, 20.0 + i as f32);
                    let inbound = router
                        .route("/sns/siteA/node7/Temperature", &payload)
                        .unwrap();
                    assert_eq!(inbound.record.timestamp, 1700000000 + i);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
