mod common;

use anyhow::Result;
use common::test_service;
use moneta::application::{AppError, MAX_DESCRIPTION_LEN};
use moneta::domain::TransactionKind;

#[tokio::test]
async fn records_a_valid_transaction() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .add_transaction(TransactionKind::Income, "Salary", 200000, None)
        .await?;
    service
        .add_transaction(TransactionKind::Expense, "Food", 5000, Some("lunch"))
        .await?;

    assert_eq!(service.balance().await?, 195000);
    let recent = service.recent(10).await?;
    assert_eq!(recent.len(), 2);

    Ok(())
}

#[tokio::test]
async fn rejects_non_positive_amounts() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let zero = service
        .add_transaction(TransactionKind::Expense, "Food", 0, None)
        .await;
    assert!(matches!(zero, Err(AppError::InvalidAmount(0))));

    let negative = service
        .add_transaction(TransactionKind::Expense, "Food", -5000, None)
        .await;
    assert!(matches!(negative, Err(AppError::InvalidAmount(-5000))));

    // Nothing reached the store
    assert!(service.recent(10).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn rejects_unknown_categories() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service
        .add_transaction(TransactionKind::Expense, "Groceries", 5000, None)
        .await;
    assert!(matches!(result, Err(AppError::UnknownCategory(_))));
    assert!(service.recent(10).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn rejects_overlong_descriptions() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let too_long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
    let result = service
        .add_transaction(TransactionKind::Expense, "Food", 5000, Some(&too_long))
        .await;
    assert!(matches!(
        result,
        Err(AppError::DescriptionTooLong { len: 501, max: 500 })
    ));

    // Exactly at the bound is fine
    let at_limit = "x".repeat(MAX_DESCRIPTION_LEN);
    service
        .add_transaction(TransactionKind::Expense, "Food", 5000, Some(&at_limit))
        .await?;
    assert_eq!(service.recent(10).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn statistics_pass_through() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .add_transaction(TransactionKind::Income, "Salary", 100000, None)
        .await?;
    service
        .add_transaction(TransactionKind::Expense, "Bills", 40000, None)
        .await?;

    let stats = service.statistics().await?;
    assert_eq!(stats.monthly_income, 100000);
    assert_eq!(stats.monthly_expense, 40000);
    assert_eq!(stats.top_categories.len(), 1);
    assert_eq!(stats.top_categories[0].category, "Bills");

    Ok(())
}

#[tokio::test]
async fn delete_pass_through_is_idempotent() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .add_transaction(TransactionKind::Income, "Salary", 100000, None)
        .await?;
    let id = service.recent(1).await?[0].id;

    assert!(service.delete_transaction(id).await);
    assert!(service.delete_transaction(id).await);
    assert!(service.recent(10).await?.is_empty());

    Ok(())
}
