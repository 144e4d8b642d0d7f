#![cfg(test)]

use super::{EscrowTest, ASSET_ID};
use common::escrow::types::EscrowError as Error;

#[test]
fn test_update_inspection_status() {
    let test: EscrowTest = EscrowTest::setup();

    test.pass_inspection();
    assert!(test.escrow_client.inspection_passed(&ASSET_ID));
}

#[test]
fn test_inspection_last_write_wins() {
    let test: EscrowTest = EscrowTest::setup();

    test.pass_inspection();
    test.escrow_client
        .update_inspection_status(&test.inspector, &ASSET_ID, &false);
    assert!(!test.escrow_client.inspection_passed(&ASSET_ID));

    test.pass_inspection();
    assert!(test.escrow_client.inspection_passed(&ASSET_ID));
}

#[test]
fn test_inspection_only_inspector() {
    let test: EscrowTest = EscrowTest::setup();

    for caller in [test.other.clone(), test.buyer.clone(), test.seller.clone()] {
        assert_eq!(
            test.escrow_client
                .try_update_inspection_status(&caller, &ASSET_ID, &true),
            Err(Ok(Error::OnlyInspector))
        );
    }
    assert!(!test.escrow_client.inspection_passed(&ASSET_ID));
}
