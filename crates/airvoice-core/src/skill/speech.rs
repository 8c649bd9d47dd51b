//! Spoken text

use crate::response::{join_device_names, SkillResponse};

const TOKEN_LOCATION: &str =
    "You can find your token in AirGradient Dashboard via General Settings > Connectivity > API Access. ";

const CHOOSE_PROMPT: &str = "Please choose which device you would like me to check by default, \
     based on the order listed above (ex. the first one). ";

const CHOOSE_REPROMPT: &str =
    "You should respond with a number based on the order of devices I have listed. ";

const WHAT_NEXT: &str = "What can I do for you today? ";

pub(crate) fn welcome_setup() -> SkillResponse {
    SkillResponse::speak(
        "Hello, welcome! \
         To set up the assistant, please enter your token. \
         This can be found in your AirGradient Dashboard via General Settings > Connectivity > API Access. ",
    )
    .ask("Please set up to continue. ")
}

pub(crate) fn welcome_back() -> SkillResponse {
    SkillResponse::speak("Hello, this is your AirGradient Assistant. What can I do for you today? ")
        .ask("Say help if you need help, or quit if you would like to leave. ")
}

pub(crate) fn choose_from(names: &[String]) -> SkillResponse {
    SkillResponse::speak(format!(
        "I see you have {} devices; {}. {}",
        names.len(),
        join_device_names(names),
        CHOOSE_PROMPT
    ))
    .ask("You can change the default device at any time. ")
}

pub(crate) fn token_saved(device_name: &str) -> SkillResponse {
    SkillResponse::speak(format!(
        "Saved the token successfully! I will check {} by default. ",
        device_name
    ))
    .ask(WHAT_NEXT)
}

pub(crate) fn token_rejected() -> SkillResponse {
    SkillResponse::speak("That token does not work. Please try again! ").ask(format!(
        "{}If I struggle to hear you properly, try typing it out instead! ",
        TOKEN_LOCATION
    ))
}

pub(crate) fn no_devices() -> SkillResponse {
    SkillResponse::speak(
        "I could not find any devices on that account. \
         Add a device in your AirGradient Dashboard, then give me the token again. ",
    )
    .ask(TOKEN_LOCATION)
}

pub(crate) fn redirect_setup() -> SkillResponse {
    SkillResponse::speak("Before I can do anything, you will need to let me know your token first. ")
        .ask(TOKEN_LOCATION)
}

pub(crate) fn redirect_choose(names: &[String]) -> SkillResponse {
    SkillResponse::speak(format!(
        "Based on this list: {}, {}",
        join_device_names(names),
        CHOOSE_PROMPT
    ))
    .ask(CHOOSE_REPROMPT)
}

pub(crate) fn only_device(device_name: &str) -> SkillResponse {
    SkillResponse::speak(format!(
        "You only have one device, {}, so I will check it by default. ",
        device_name
    ))
    .ask(WHAT_NEXT)
}

pub(crate) fn account_unreachable() -> SkillResponse {
    SkillResponse::speak(
        "I could not reach your AirGradient account just now. Please try again in a moment. ",
    )
    .ask(CHOOSE_REPROMPT)
}

pub(crate) fn device_saved(device_name: &str) -> SkillResponse {
    SkillResponse::speak(format!(
        "Saved default device successfully! I will check {} from now on. ",
        device_name
    ))
    .ask(WHAT_NEXT)
}

pub(crate) fn device_rejected() -> SkillResponse {
    SkillResponse::speak(format!("Sorry, that number does not work. {}", CHOOSE_PROMPT))
        .ask(CHOOSE_REPROMPT)
}

pub(crate) fn reading(sentence: String) -> SkillResponse {
    SkillResponse::speak(sentence).ask("What else can I do for you today? ")
}

pub(crate) fn reading_unavailable() -> SkillResponse {
    SkillResponse::speak(
        "I could not get a reading from your device right now. Please try again in a moment. ",
    )
    .ask("What else can I do for you today? ")
}

pub(crate) fn help(labels: &[&str]) -> SkillResponse {
    SkillResponse::speak(format!(
        "I can tell you the {} measured by your default AirGradient device. \
         For example, say: what is the carbon dioxide level? ",
        join_alternatives(labels)
    ))
    .ask("What would you like to know? ")
}

/// `a, b, or c`
fn join_alternatives(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}

pub(crate) fn goodbye() -> SkillResponse {
    SkillResponse::speak("Goodbye, and breathe easy! ").end_session()
}

pub(crate) fn fallback(skill_name: &str) -> SkillResponse {
    SkillResponse::speak(format!(
        "The {} skill can't help you with that. \
         You can ask me for the carbon dioxide level, PM2.5, temperature, or humidity. ",
        skill_name
    ))
    .ask("What would you like to know? ")
}

pub(crate) fn unhandled() -> SkillResponse {
    let text = "Sorry, I didn't get that. Say help to hear what I can do. ";
    SkillResponse::speak(text).ask(text)
}

pub(crate) fn apology() -> SkillResponse {
    let text = "Sorry, I can't understand that. Please say again. ";
    SkillResponse::speak(text).ask(text)
}
