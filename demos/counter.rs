//! Counter Example - Observables refreshing mounted components
//!
//! This example demonstrates the reactive side of spark-markup:
//! - Building a page out of layouts, text and a button
//! - Subscribing a component to an observable
//! - Clicking through the in-memory host and watching the markup change
//!
//! Run with: RUST_LOG=spark_markup=debug cargo run --example counter

use std::rc::Rc;

use spark_markup::{
    attrs, children, create_element, use_effect, use_state, App, AttrValue, Descriptor,
    FlexLayout, MemorySurface, Observable, PageOptions, Registry, Text,
};
use tracing_subscriber::EnvFilter;

fn counter_page(reg: &Registry, count: &Observable) -> spark_markup::Node {
    let label = create_element(
        reg,
        Descriptor::class::<Text>(),
        attrs! { "id" => "label", "foreground" => "teal" },
        children!["Count: ", count],
    );

    let handle = count.clone();
    let button = create_element(
        reg,
        "button",
        attrs! {
            "id" => "plus",
            "paddingH" => "8px",
            "onclick" => AttrValue::callback(move || {
                handle.increment();
            }),
        },
        children!["+1"],
    );

    let page = create_element(
        reg,
        Descriptor::class::<FlexLayout>(),
        attrs! { "id" => "page", "center" => true },
        children![label, button],
    );
    // Only the mounted root can refresh in place
    count.subscribe(&page);
    page
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-markup Counter Example ===\n");

    let surface = Rc::new(MemorySurface::new());
    let mut app = App::new(surface.clone());

    let count = use_state(0, Vec::<&spark_markup::Node>::new());
    let _effects = use_effect(|value| println!("  (mutate) count is now {value}"), &[&count]);

    let page_count = count.clone();
    app.register(
        "counter",
        move |reg: &Registry| Some(counter_page(reg, &page_count)),
        PageOptions::new().with_title("Counter"),
    );
    app.register("empty", |_| None, PageOptions::default());

    app.render("counter");
    app.load();
    println!("Initial markup:\n  {}\n", surface.markup());

    for _ in 0..3 {
        surface.click("plus");
    }
    println!("\nAfter three clicks:\n  {}\n", surface.markup());

    count.set("ten");
    println!("Text value:\n  {}", surface.markup());
    println!("  increment on text applies: {}\n", count.increment());

    app.render("empty");
    println!("Empty page appended:\n  {}\n", surface.markup());

    println!("=== Example Complete ===");
}
