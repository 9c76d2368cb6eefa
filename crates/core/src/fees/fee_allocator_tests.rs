//! Tests for the fee allocator.

#[cfg(test)]
mod tests {
    use crate::accounts::Account;
    use crate::fees::{
        FeeAllocator, FeeEntry, FeeEntrySource, FeeError, FeeMode, FeeState, TransactionTag,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn account(id: &str, account_type: &str, currency: &str) -> Account {
        Account {
            id: id.to_string(),
            name: id.to_string(),
            account_type: account_type.to_string(),
            currency: currency.to_string(),
            is_active: true,
        }
    }

    fn brokerage() -> Account {
        account("brokerage", "INVESTMENT", "USD")
    }

    fn commissions() -> Account {
        account("commissions", "EXPENSE", "USD")
    }

    fn categorized_fee(amount: Decimal) -> FeeEntry {
        FeeEntry::transfer(brokerage(), commissions(), amount)
            .unwrap()
            .with_tag(TransactionTag::InvestmentFee)
    }

    /// A stored entry the host may not be able to copy.
    enum StoredFee {
        Entry(FeeEntry),
        Unsupported,
    }

    impl FeeEntrySource for StoredFee {
        fn duplicate(&self) -> Result<FeeEntry, FeeError> {
            match self {
                StoredFee::Entry(entry) => entry.duplicate(),
                StoredFee::Unsupported => Err(FeeError::InvalidEntry {
                    id: "legacy".to_string(),
                    reason: "unsupported entry variant".to_string(),
                }),
            }
        }
    }

    // ============================================================================
    // Simple fees
    // ============================================================================

    #[test]
    fn test_new_allocator_is_empty() {
        let allocator = FeeAllocator::new();
        assert_eq!(allocator.mode(), FeeMode::Empty);
        assert_eq!(allocator.displayed_amount(), Decimal::ZERO);
        assert!(allocator.is_amount_editable());
        assert!(allocator.commit(&brokerage()).is_empty());
    }

    #[test]
    fn test_simple_fee_round_trip() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.load::<FeeEntry>(&[], &account);
        allocator.set_amount(dec!(12.50)).unwrap();
        assert_eq!(allocator.mode(), FeeMode::Simple);

        let fees = allocator.commit(&account);
        assert_eq!(fees.len(), 1);
        let fee = &fees[0];
        assert_eq!(fee.debit_account, account);
        assert_eq!(fee.credit_account, account);
        assert_eq!(fee.amount_for(&account), dec!(-12.50));
        assert_eq!(fee.tag, TransactionTag::InvestmentFee);
    }

    #[test]
    fn test_simple_fee_is_always_an_outflow() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.set_amount(dec!(-7.25)).unwrap();

        let fees = allocator.commit(&account);
        assert_eq!(fees[0].amount_for(&account), dec!(-7.25));

        allocator.set_amount(dec!(7.25)).unwrap();
        assert_eq!(allocator.commit(&account)[0].amount_for(&account), dec!(-7.25));
    }

    #[test]
    fn test_zero_fee_is_elided() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.load::<FeeEntry>(&[], &account);
        assert!(allocator.commit(&account).is_empty());

        allocator.set_amount(dec!(5)).unwrap();
        allocator.set_amount(dec!(0.00)).unwrap();
        assert_eq!(allocator.state(), &FeeState::Empty);
        assert!(allocator.commit(&account).is_empty());
    }

    #[test]
    fn test_double_commit_does_not_duplicate_fee() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.set_amount(dec!(3)).unwrap();

        let first = allocator.commit(&account);
        let second = allocator.commit(&account);
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(first[0].id, second[0].id);
        assert!(allocator.entries().is_empty());
    }

    #[test]
    fn test_new_session_gets_new_simple_fee_id() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.set_amount(dec!(3)).unwrap();
        let first = allocator.commit(&account);

        allocator.clear();
        allocator.set_amount(dec!(3)).unwrap();
        let second = allocator.commit(&account);
        assert_ne!(first[0].id, second[0].id);
    }

    // ============================================================================
    // Loading a single entry
    // ============================================================================

    #[test]
    fn test_self_referential_entry_collapses_to_simple() {
        let account = brokerage();
        let stored = FeeEntry::single(account.clone(), dec!(9.00));

        let mut allocator = FeeAllocator::new();
        allocator.load(&[stored.clone()], &account);

        assert_eq!(allocator.mode(), FeeMode::Simple);
        assert_eq!(allocator.displayed_amount(), dec!(9.00));
        assert!(allocator.entries().is_empty());
        assert!(allocator.is_amount_editable());

        let fees = allocator.commit(&account);
        assert_eq!(fees.len(), 1);
        assert_eq!(fees[0].amount_for(&account), dec!(-9.00));
        assert!(fees[0].is_single_account());
        assert_ne!(fees[0].id, stored.id);
    }

    #[test]
    fn test_self_referential_zero_entry_loads_empty() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.load(&[FeeEntry::single(account.clone(), dec!(0))], &account);
        assert_eq!(allocator.mode(), FeeMode::Empty);
        assert!(allocator.commit(&account).is_empty());
    }

    #[test]
    fn test_malformed_self_referential_entry_still_collapses() {
        let account = brokerage();
        let mut stored = FeeEntry::single(account.clone(), dec!(-9));
        stored.credit_amount = dec!(-8);
        assert!(stored.validate().is_err());

        let mut allocator = FeeAllocator::new();
        allocator.load(&[&stored], &account);

        assert_eq!(allocator.state(), &FeeState::Simple(dec!(8)));
        assert!(allocator.issues().is_empty());
        assert_eq!(allocator.commit(&account)[0].amount_for(&account), dec!(-8));
    }

    #[test]
    fn test_host_self_referential_entry_collapses_after_copy() {
        let account = brokerage();
        let stored = StoredFee::Entry(FeeEntry::single(account.clone(), dec!(-2.5)));

        let mut allocator = FeeAllocator::new();
        allocator.load(&[stored], &account);

        assert_eq!(allocator.state(), &FeeState::Simple(dec!(2.5)));
        assert!(allocator.entries().is_empty());
    }

    #[test]
    fn test_single_categorized_entry_is_detailed() {
        let account = brokerage();
        let stored = categorized_fee(dec!(4.75));

        let mut allocator = FeeAllocator::new();
        allocator.load(&[&stored], &account);

        assert_eq!(allocator.mode(), FeeMode::Detailed);
        assert_eq!(allocator.displayed_amount(), dec!(4.75));
        assert!(allocator.is_amount_editable());
        assert_eq!(allocator.commit(&account), vec![stored]);
    }

    #[test]
    fn test_single_categorized_entry_can_be_re_amounted() {
        let account = brokerage();
        let stored = categorized_fee(dec!(4.75));

        let mut allocator = FeeAllocator::new();
        allocator.load(&[stored.clone()], &account);
        allocator.set_amount(dec!(6)).unwrap();

        assert_eq!(allocator.displayed_amount(), dec!(6));
        let fees = allocator.commit(&account);
        assert_eq!(fees[0].amount_for(&account), dec!(-6));
        assert_eq!(fees[0].amount_for(&commissions()), dec!(6));
        // the caller's entry is untouched
        assert_eq!(stored.credit_amount, dec!(4.75));
    }

    #[test]
    fn test_cross_currency_entry_uses_account_side() {
        let edited = brokerage();
        let foreign = account("foreign-fees", "EXPENSE", "EUR");
        let stored = FeeEntry::exchange(edited.clone(), foreign, dec!(-11.00), dec!(10.00));

        let mut allocator = FeeAllocator::new();
        allocator.load(&[stored], &edited);

        assert_eq!(allocator.displayed_amount(), dec!(11.00));
        assert!(matches!(
            allocator.set_amount(dec!(12)),
            Err(FeeError::CrossCurrencyEntry { .. })
        ));
        assert_eq!(allocator.displayed_amount(), dec!(11.00));
    }

    // ============================================================================
    // Loading several entries
    // ============================================================================

    #[test]
    fn test_detailed_aggregation() {
        let account = brokerage();
        let entry_a = categorized_fee(dec!(3.00));
        let entry_b = categorized_fee(dec!(4.00));
        assert_eq!(entry_a.amount_for(&account), dec!(-3.00));

        let mut allocator = FeeAllocator::new();
        allocator.load(&[entry_a.clone(), entry_b.clone()], &account);

        assert_eq!(allocator.mode(), FeeMode::Detailed);
        assert_eq!(allocator.displayed_amount(), dec!(7.00));
        assert!(!allocator.is_amount_editable());
        assert_eq!(allocator.commit(&account), vec![entry_a, entry_b]);
    }

    #[test]
    fn test_sum_is_algebraic() {
        let account = brokerage();
        let refund = FeeEntry::exchange(commissions(), account.clone(), dec!(-1.00), dec!(1.00));

        let mut allocator = FeeAllocator::new();
        allocator.load(&[categorized_fee(dec!(3.00)), refund.clone()], &account);

        assert_eq!(allocator.displayed_amount(), dec!(2.00));
        // stored signs are preserved
        assert_eq!(allocator.entries()[1].amount_for(&account), dec!(1.00));
    }

    #[test]
    fn test_aggregate_amount_is_read_only() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.load(
            &[categorized_fee(dec!(1)), categorized_fee(dec!(2))],
            &account,
        );

        assert_eq!(
            allocator.set_amount(dec!(10)),
            Err(FeeError::ReadOnlyAmount { entries: 2 })
        );
        assert_eq!(allocator.displayed_amount(), dec!(3));
    }

    #[test]
    fn test_loaded_entries_are_copies() {
        let account = brokerage();
        let mut stored = vec![categorized_fee(dec!(1)), categorized_fee(dec!(2))];

        let mut allocator = FeeAllocator::new();
        allocator.load(&stored, &account);
        stored[0].set_amount(dec!(100)).unwrap();

        assert_eq!(allocator.entries()[0].credit_amount, dec!(1));
        assert_eq!(allocator.displayed_amount(), dec!(3));
    }

    #[test]
    fn test_partial_clone_failure() {
        let account = brokerage();
        let entry_a = categorized_fee(dec!(3.00));
        let mut entry_b = categorized_fee(dec!(4.00));
        entry_b.debit_amount = dec!(4.00);

        let mut allocator = FeeAllocator::new();
        allocator.load(&[entry_a.clone(), entry_b.clone()], &account);

        assert_eq!(allocator.mode(), FeeMode::Detailed);
        assert_eq!(allocator.entries(), &[entry_a.clone()]);
        assert_eq!(allocator.displayed_amount(), dec!(3.00));

        let issues = allocator.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].index, 1);
        assert!(matches!(
            &issues[0].error,
            FeeError::InvalidEntry { id, .. } if *id == entry_b.id
        ));
        assert_eq!(allocator.commit(&account), vec![entry_a]);
    }

    #[test]
    fn test_host_defined_duplication_failure() {
        let account = brokerage();
        let entry = categorized_fee(dec!(2.50));
        let stored = vec![
            StoredFee::Unsupported,
            StoredFee::Entry(entry.clone()),
            StoredFee::Unsupported,
        ];

        let mut allocator = FeeAllocator::new();
        allocator.load(&stored, &account);

        assert_eq!(allocator.entries(), &[entry]);
        assert_eq!(allocator.displayed_amount(), dec!(2.50));
        let skipped: Vec<usize> = allocator.issues().iter().map(|i| i.index).collect();
        assert_eq!(skipped, vec![0, 2]);
    }

    #[test]
    fn test_overflowing_sum_does_not_panic() {
        let account = brokerage();
        let huge = Decimal::MAX - dec!(1);
        let entries = vec![categorized_fee(huge), categorized_fee(huge)];

        let mut allocator = FeeAllocator::new();
        allocator.load(&entries, &account);

        assert_eq!(allocator.mode(), FeeMode::Detailed);
        assert_eq!(
            allocator.total_amount(),
            Err(FeeError::AmountOverflow { entries: 2 })
        );
        assert_eq!(allocator.displayed_amount(), Decimal::MAX);
        assert_eq!(allocator.commit(&account), entries);
    }

    #[test]
    fn test_all_entries_failing_leaves_allocator_empty() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.load(&[StoredFee::Unsupported], &account);

        assert_eq!(allocator.mode(), FeeMode::Empty);
        assert_eq!(allocator.issues().len(), 1);
        assert!(allocator.commit(&account).is_empty());
    }

    // ============================================================================
    // Reloading and clearing
    // ============================================================================

    #[test]
    fn test_load_replaces_previous_state() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.load(&[StoredFee::Unsupported, StoredFee::Unsupported], &account);
        assert_eq!(allocator.issues().len(), 2);

        allocator.load(&[categorized_fee(dec!(1)), categorized_fee(dec!(1))], &account);
        assert_eq!(allocator.entries().len(), 2);
        assert!(allocator.issues().is_empty());

        allocator.load::<FeeEntry>(&[], &account);
        assert_eq!(allocator.mode(), FeeMode::Empty);
        assert_eq!(allocator.displayed_amount(), Decimal::ZERO);
        assert_eq!(allocator.account(), Some(&account));
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let account = brokerage();
        let mut allocator = FeeAllocator::new();
        allocator.load(&[categorized_fee(dec!(1)), categorized_fee(dec!(2))], &account);

        allocator.clear();
        assert_eq!(allocator.mode(), FeeMode::Empty);
        assert!(allocator.entries().is_empty());
        assert_eq!(allocator.displayed_amount(), Decimal::ZERO);
        assert!(allocator.is_amount_editable());
        assert!(allocator.commit(&account).is_empty());
    }
}
