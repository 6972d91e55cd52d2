//! Headless simulation of the wallet stack: drag, fling, tap, notification.

use cardstack::{CardStack, ImageHandle, ItemKind, ItemWidth, StackItem};

fn main() {
    // The hardcoded wallet: eight cards plus two passes.
    let mut items: Vec<StackItem> = (0..8)
        .map(|i| {
            StackItem::new(
                format!("card-{i}"),
                ItemKind::Card,
                ImageHandle::new(format!("assets/cards/{i}.png")),
                240.0,
            )
        })
        .collect();
    items.push(
        StackItem::new(
            "boarding-pass",
            ItemKind::Pass,
            ImageHandle::new("assets/passes/boarding.png"),
            140.0,
        )
        .with_width(ItemWidth::Fixed(320.0)),
    );
    items.push(
        StackItem::new(
            "concert-pass",
            ItemKind::Pass,
            ImageHandle::new("assets/passes/concert.png"),
            140.0,
        )
        .with_width(ItemWidth::Fixed(320.0)),
    );

    let (mut stack, notifications) = CardStack::mount(items, 800.0).expect("valid wallet items");
    println!(
        "mounted: extent={} max_scroll={}",
        stack.geometry().content_extent,
        stack.geometry().max_scroll
    );
    println!("at rest: {:?}", stack.translations());

    // Drag up 120 units over a few frames, then release with a fling.
    let mut now = 0;
    stack.pointer_down(700.0, now);
    for step in 1..=6u64 {
        now = step * 16;
        stack.pointer_move(700.0 - 20.0 * step as f32, now);
    }
    stack.pointer_up(580.0, now);
    while stack.tick(now) {
        now += 16;
    }
    println!("after fling: scroll={}", stack.scroll_position());

    // Tap the top visible card.
    stack.pointer_down(10.0, now);
    now += 60;
    stack.pointer_up(10.0, now);
    while stack.tick(now) {
        now += 16;
    }
    println!("active={:?} translations={:?}", stack.active(), stack.translations());

    // The application side drains activation changes on its own thread.
    notifications.drain(|next| println!("onActiveChange({next:?})"));

    // Tap anywhere while active: deactivates (switching takes a second tap).
    stack.pointer_down(650.0, now);
    now += 60;
    stack.pointer_up(650.0, now);
    while stack.tick(now) {
        now += 16;
    }
    notifications.drain(|next| println!("onActiveChange({next:?})"));
    println!("back to rest: {:?}", stack.translations());
}
