use super::*;

/// Tests the OAuth state is accepted once.
///
/// Expected: first validation passes, replay fails
#[tokio::test]
async fn state_is_single_use() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let csrf = CsrfSession::new(session);
    csrf.set_token("state-1".to_string()).await?;

    csrf.validate("state-1").await?;
    let replay = csrf.validate("state-1").await;

    assert!(matches!(
        replay,
        Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
    ));

    Ok(())
}

/// Expected: Err(AuthError::CsrfValidationFailed) and the stored state is consumed
#[tokio::test]
async fn rejects_mismatched_state() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let csrf = CsrfSession::new(session);
    csrf.set_token("expected".to_string()).await?;

    let result = csrf.validate("forged").await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
    ));
    assert_eq!(csrf.take_token().await?, None);

    Ok(())
}
