use super::test_helpers::*;
use super::*;

#[tokio::test]
async fn mounted_widgets_are_independent() {
    let state = test_app_state();
    let (a_id, a) = state.mount_widget().await;
    let (b_id, b) = state.mount_widget().await;
    assert_ne!(a_id, b_id);

    a.send_turn("rust").await.unwrap();
    assert_eq!(a.transcript().len(), 3);
    assert_eq!(b.transcript().len(), 1);
}

#[tokio::test]
async fn widget_lookup_returns_same_instance() {
    let state = test_app_state();
    let (id, widget) = state.mount_widget().await;
    let found = state.widget(id).await.unwrap();
    assert!(Arc::ptr_eq(&widget, &found));
    assert!(state.widget(Uuid::new_v4()).await.is_none());
}

#[tokio::test]
async fn unmount_removes_widget_once() {
    let state = test_app_state();
    let (id, _) = state.mount_widget().await;
    assert!(state.unmount_widget(id).await);
    assert!(!state.unmount_widget(id).await);
    assert!(state.widget(id).await.is_none());
}

#[tokio::test]
async fn unmount_keeps_in_flight_handle_usable() {
    let state = test_app_state();
    let (id, widget) = state.mount_widget().await;
    state.unmount_widget(id).await;
    // A handle taken before unmount still completes its turn.
    widget.send_turn("late").await.unwrap();
    assert_eq!(widget.transcript().len(), 3);
}
