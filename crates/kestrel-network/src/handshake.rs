//! Connection handshake

use crate::config::NetworkConfig;
use crate::error::{NetworkError, NetworkResult};
use crate::frame::{read_version, write_version};
use crate::version::Version;
use bytes::Bytes;
use futures::{Sink, Stream};
use tracing::{debug, warn};

/// Exchange [`Version`] records over a fresh connection
///
/// Sends ours, then waits for the peer's, all within
/// [`NetworkConfig::handshake_timeout`]. Both sides may call this
/// concurrently. Returns the peer's record once it is accepted; the same
/// reader and writer then carry payloads.
pub async fn handshake<R, W>(
    reader: &mut R,
    writer: &mut W,
    ours: &Version,
    config: &NetworkConfig,
) -> NetworkResult<Version>
where
    R: Stream<Item = NetworkResult<Bytes>> + Unpin,
    W: Sink<Bytes, Error = NetworkError> + Unpin,
{
    let exchange = async {
        write_version(writer, ours).await?;
        read_version(reader, config).await
    };

    let theirs = tokio::time::timeout(config.handshake_timeout(), exchange)
        .await
        .map_err(|_| NetworkError::HandshakeTimeout)??;

    if theirs.version < config.min_version {
        warn!(
            theirs = theirs.version,
            min = config.min_version,
            node_id = theirs.node_id,
            "rejecting peer with old protocol version"
        );
        return Err(NetworkError::IncompatibleVersion {
            ours: config.min_version,
            theirs: theirs.version,
        });
    }

    debug!(
        version = theirs.version,
        listening_port = theirs.listening_port,
        node_id = theirs.node_id,
        "handshake complete"
    );
    Ok(theirs)
}
