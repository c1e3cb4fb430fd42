use std::collections::HashSet;
use upf::pfcp::{self, Cause};
use upf_tests::MockSmf;
use upf_tests::framework::*;

#[async_std::test]
async fn establish_then_modify() -> anyhow::Result<()> {
    let (smf, upf, table, _logger) = init().await?;

    smf.perform_association_setup(1).await?;

    // SMF asks for a session, addressed to it as SEID 0xAA.
    let local_seid = smf.establish_session(2, 0xAA).await?;
    assert_ne!(local_seid, 0);
    assert_eq!(upf.session_count(), 1);

    // The uplink fast-path rule points at the SMF's data-plane address.
    let teid = local_seid as u32;
    assert_eq!(table.action(teid).await, Some(u32::from(smf.local_ipv4()?)));

    // A modification against the fresh SEID is accepted.
    let response = smf.modify_session(3, local_seid, None).await?;
    assert_eq!(pfcp::parse::cause(&response), Some(Cause::RequestAccepted));
    Ok(())
}

#[async_std::test]
async fn establishment_response_carries_own_fseid() -> anyhow::Result<()> {
    let (smf, _upf, _table, _logger) = init().await?;

    let fseid = upf_tests::fseid(0xAA, smf.local_ipv4()?);
    let response = smf.request_session_establishment(2, Some(fseid)).await?;

    // Header SEID is the peer's; the F-SEID IE is ours.
    assert_eq!(response.seid, Some(0xAA));
    let own_fseid = pfcp::parse::fseid(&response).expect("no F-SEID in response");
    assert_eq!(own_fseid.ipv4, Some(UPF_NODE_ADDR));
    assert_ne!(own_fseid.seid, 0);
    Ok(())
}

#[async_std::test]
async fn missing_fseid_rejected() -> anyhow::Result<()> {
    let (smf, upf, _table, _logger) = init().await?;

    let response = smf.request_session_establishment(5, None).await?;

    assert_eq!(
        pfcp::parse::cause(&response),
        Some(Cause::MandatoryIeMissing)
    );
    assert_eq!(response.seid, Some(0));
    assert_eq!(upf.session_count(), 0);
    Ok(())
}

#[async_std::test]
async fn local_seids_are_fresh() -> anyhow::Result<()> {
    let (smf, upf, _table, _logger) = init().await?;

    // Even with a colliding remote SEID on every request, each session gets
    // its own local SEID.
    let mut seids = HashSet::new();
    for seq in 1..=10 {
        seids.insert(smf.establish_session(seq, 0xAA).await?);
    }

    assert_eq!(seids.len(), 10);
    assert_eq!(upf.session_count(), 10);
    Ok(())
}

#[async_std::test]
async fn two_smfs_get_distinct_sessions() -> anyhow::Result<()> {
    let (smf, upf, _table, logger) = init().await?;
    let second_smf = MockSmf::new(upf.n4_addr(), &logger).await?;

    let first = smf.establish_session(1, 0xAA).await?;
    let second = second_smf.establish_session(1, 0xAA).await?;

    assert_ne!(first, second);
    assert_eq!(upf.session_count(), 2);
    Ok(())
}
