use std::net::Ipv4Addr;
use upf::InMemoryForwardingTable;
use upf::pfcp::{self, Cause};
use upf_tests::framework::*;
use upf_tests::fseid;

#[async_std::test]
async fn unknown_session_rejected() -> anyhow::Result<()> {
    let (smf, upf, _table, _logger) = init().await?;

    // A SEID the UPF never issued.
    let response = smf.modify_session(4, 0xDEAD, None).await?;

    assert_eq!(response.sequence_number, 4);
    assert_eq!(pfcp::parse::cause(&response), Some(Cause::RequestRejected));
    assert_eq!(upf.session_count(), 0);
    Ok(())
}

#[async_std::test]
async fn modification_rebinds_session_endpoint() -> anyhow::Result<()> {
    let (smf, _upf, table, _logger) = init().await?;

    let local_seid = smf.establish_session(1, 0xAA).await?;
    let new_endpoint = Ipv4Addr::new(10, 0, 0, 1);

    let response = smf
        .modify_session(2, local_seid, Some(fseid(0xBB, new_endpoint)))
        .await?;

    assert_eq!(pfcp::parse::cause(&response), Some(Cause::RequestAccepted));
    // The response header now names the rebound peer SEID and the
    // fast-path rule follows the new data-plane address.
    assert_eq!(response.seid, Some(0xBB));
    assert_eq!(
        table.action(local_seid as u32).await,
        Some(u32::from(new_endpoint))
    );
    Ok(())
}

#[async_std::test]
async fn bridge_failure_does_not_fail_the_procedure() -> anyhow::Result<()> {
    // A zero-capacity table makes every fast-path upsert fail.
    let (smf, upf, table, _logger) =
        init_with_table(InMemoryForwardingTable::with_capacity(0)).await?;

    let local_seid = smf.establish_session(1, 0xAA).await?;
    assert_eq!(table.action(local_seid as u32).await, None);

    // Bridging is best-effort: the session exists and modification still
    // reports acceptance even though no rule was installed.
    let response = smf
        .modify_session(2, local_seid, Some(fseid(0xBB, Ipv4Addr::new(10, 0, 0, 1))))
        .await?;
    assert_eq!(pfcp::parse::cause(&response), Some(Cause::RequestAccepted));
    assert_eq!(table.action(local_seid as u32).await, None);
    assert_eq!(upf.session_count(), 1);
    Ok(())
}
