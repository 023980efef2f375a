use headless_chrome::{Browser, LaunchOptions, Tab};
use mdwright::resolver;
use serde_json::Value;
use std::sync::Arc;

/// Open `body` in a fresh headless tab with the resolver helpers installed
fn open(body: &str) -> (Browser, Arc<Tab>) {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .build()
        .expect("Failed to build launch options");
    let browser = Browser::new(options).expect("Failed to launch browser");
    let tab = browser.new_tab().expect("Failed to create tab");

    let html = format!("<!doctype html><html><head><meta charset=\"utf-8\"></head><body>{}</body></html>", body);
    tab.navigate_to(&format!("data:text/html;charset=utf-8,{}", urlencoding::encode(&html)))
        .expect("Failed to navigate")
        .wait_until_navigated()
        .expect("Navigation did not complete");

    tab.evaluate(resolver::HELPERS_JS, false).expect("Failed to install helpers");
    (browser, tab)
}

fn eval(tab: &Tab, expression: &str) -> Value {
    tab.evaluate(expression, false)
        .expect("Evaluation failed")
        .value
        .unwrap_or(Value::Null)
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_label_for_attribute() {
    let (_browser, tab) = open(r#"<label for="email">E-mail</label><div></div><input id="email">"#);

    assert_eq!(eval(&tab, &resolver::by_label_id("E-mail")), Value::from("email"));
    assert_eq!(eval(&tab, &resolver::label_tier_for("E-mail")), Value::from("labelElement"));
}

#[test]
#[ignore]
fn test_label_followed_by_input() {
    let (_browser, tab) = open("<label>E-mail</label><input>");

    assert_eq!(eval(&tab, r#"window.__mdw.byLabel("E-mail") === document.querySelector("input")"#), Value::Bool(true));
}

#[test]
#[ignore]
fn test_label_exact_beats_containment() {
    let (_browser, tab) = open(
        r#"<label for="confirm">パスワード（確認）</label><input id="confirm">
           <label for="pw">パスワード</label><input id="pw">"#,
    );

    assert_eq!(eval(&tab, &resolver::by_label_id("パスワード")), Value::from("pw"));
    assert_eq!(eval(&tab, &resolver::by_label_id("確認")), Value::from("confirm"));
}

#[test]
#[ignore]
fn test_aria_label_and_placeholder_tiers() {
    let (_browser, tab) = open(r#"<input id="q" aria-label="Search"><textarea id="memo" placeholder="Write a memo here"></textarea>"#);

    assert_eq!(eval(&tab, &resolver::label_tier_for("Search")), Value::from("ariaLabel"));
    assert_eq!(eval(&tab, &resolver::by_label_id("Search")), Value::from("q"));
    assert_eq!(eval(&tab, &resolver::label_tier_for("a memo")), Value::from("placeholder"));
    assert_eq!(eval(&tab, &resolver::by_label_id("a memo")), Value::from("memo"));
    assert_eq!(eval(&tab, &resolver::by_label_id("Phone")), Value::Null);
}

#[test]
#[ignore]
fn test_type_by_label_dispatches_events() {
    let (_browser, tab) = open(
        r#"<label for="email">メールアドレス</label><input id="email">
           <script>
             const el = document.getElementById('email');
             el.addEventListener('input', () => document.body.dataset.input = el.value);
             el.addEventListener('change', () => document.body.dataset.change = el.value);
           </script>"#,
    );

    assert_eq!(eval(&tab, &resolver::type_by_label("メールアドレス", "user@example.com")), Value::Bool(true));
    assert_eq!(eval(&tab, "document.body.dataset.input"), Value::from("user@example.com"));
    assert_eq!(eval(&tab, "document.body.dataset.change"), Value::from("user@example.com"));
    assert_eq!(eval(&tab, "document.activeElement.id"), Value::from("email"));

    assert_eq!(eval(&tab, &resolver::type_by_label("電話番号", "0120")), Value::Bool(false));
}

#[test]
#[ignore]
fn test_click_exact_then_containment() {
    let (_browser, tab) = open(r#"<button onclick="document.title = 'clicked'">Login</button>"#);

    assert_eq!(eval(&tab, &resolver::click_tier_for("Login")), Value::from("exactButton"));
    assert_eq!(eval(&tab, &resolver::click_tier_for("Log")), Value::from("buttonText"));

    assert_eq!(eval(&tab, &resolver::click_by_text("Log")), Value::Bool(true));
    assert_eq!(eval(&tab, "document.title"), Value::from("clicked"));
}

#[test]
#[ignore]
fn test_click_exact_matches_nested_markup() {
    let (_browser, tab) = open(r#"<div role="button"><b>Sign</b>   up</div><button>It's "quoted"</button>"#);

    assert_eq!(eval(&tab, &resolver::click_tier_for("Sign up")), Value::from("exactButton"));
    assert_eq!(eval(&tab, &resolver::click_tier_for(r#"It's "quoted""#)), Value::from("exactButton"));
}

#[test]
#[ignore]
fn test_click_input_button_and_any_element() {
    let (_browser, tab) = open(
        r#"<input type="submit" value="送信する">
           <div><p onclick="document.title = 'inner'">Read more</p></div>"#,
    );

    assert_eq!(eval(&tab, &resolver::click_tier_for("送信")), Value::from("inputButton"));
    assert_eq!(eval(&tab, &resolver::click_tier_for("Read more")), Value::from("anyElement"));

    eval(&tab, &resolver::click_by_text("Read more"));
    assert_eq!(eval(&tab, "document.title"), Value::from("inner"));
}

#[test]
#[ignore]
fn test_click_falls_back_to_form_submit_and_enter() {
    let (_browser, tab) = open(r#"<form onsubmit="event.preventDefault(); document.title = 'submitted'"><input id="q"></form>"#);

    assert_eq!(eval(&tab, &resolver::click_tier_for("Go")), Value::from("submitForm"));
    assert_eq!(eval(&tab, &resolver::click_by_text("Go")), Value::Bool(true));
    assert_eq!(eval(&tab, "document.title"), Value::from("submitted"));

    let (_browser, tab) = open("<p>nothing to press</p>");
    assert_eq!(eval(&tab, &resolver::click_tier_for("Go")), Value::from("pressEnter"));
}

#[test]
#[ignore]
fn test_visible_text_ignores_whitespace() {
    let (_browser, tab) = open("<p>Welcome   back</p><p style=\"display:none\">hidden words</p>");

    assert_eq!(eval(&tab, &resolver::visible_text_exists("Welcome back")), Value::Bool(true));
    assert_eq!(eval(&tab, &resolver::visible_text_exists("  Welcome \n back ")), Value::Bool(true));
    assert_eq!(eval(&tab, &resolver::visible_text_exists("hidden words")), Value::Bool(false));
    assert_eq!(eval(&tab, &resolver::visible_text_exists("Goodbye")), Value::Bool(false));
}
