// ============================================================================
// I18N - Translation lookup
// ============================================================================

use std::collections::HashMap;

use crate::context::language::Locale;

fn get_translations(locale: Locale) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();

    match locale {
        Locale::Nepali => {
            // Account
            translations.insert("login_title", "लग इन");
            translations.insert("username_or_email", "तपाईंको इमेल वा प्रयोगकर्ता नाम");
            translations.insert("password", "पासवर्ड");
            translations.insert("remember_me", "मलाई सम्झनुहोस्");
            translations.insert("forgot_password", "पासवर्ड बिर्सनुभयो?");
            translations.insert("create_account", "खाता बनाउनुहोस्");
            translations.insert("log_in", "लग इन");
            translations.insert("log_out", "लग आउट");
            translations.insert("send_email", "इमेल पठाउनुहोस्");
            translations.insert("submit", "पेश गर्नुहोस्");
            translations.insert("verify_email", "इमेल प्रमाणित गर्नुहोस्");

            // Dashboard
            translations.insert("welcome", "स्वागत छ");
            translations.insert("create_class", "कक्षा बनाउनुहोस्");
            translations.insert("class_name", "कक्षाको नाम");
            translations.insert("next", "अर्को");
            translations.insert("students", "विद्यार्थीहरू");

            // Students
            translations.insert("add_student", "+ विद्यार्थी थप्नुहोस्");
            translations.insert("add_row", "+ पङ्क्ति थप्नुहोस्");
            translations.insert("add_five_rows", "+ ५ पङ्क्ति थप्नुहोस्");
            translations.insert("import_csv", "+ CSV आयात गर्नुहोस्");
            translations.insert("create_student", "विद्यार्थी बनाउनुहोस्");
            translations.insert("skip", "छोड्नुहोस्");
            translations.insert("search_students", "विद्यार्थी खोज्नुहोस्");
            translations.insert("remove_from_class", "कक्षाबाट हटाउनुहोस्");
            translations.insert("add_to_another_class", "अर्को कक्षामा थप्नुहोस्");
            translations.insert("download_csv", "CSV डाउनलोड गर्नुहोस्");
            translations.insert("go_to_class", "कक्षामा जानुहोस्");
            translations.insert("confirm", "पुष्टि गर्नुहोस्");
            translations.insert("back", "पछाडि");
            translations.insert("loading", "लोड हुँदैछ...");
        }
        Locale::Maithili => {
            // Account
            translations.insert("login_title", "लग इन");
            translations.insert("username_or_email", "अहाँक इमेल वा प्रयोगकर्ता नाम");
            translations.insert("password", "पासवर्ड");
            translations.insert("remember_me", "हमरा मोन राखू");
            translations.insert("forgot_password", "पासवर्ड बिसरि गेलहुँ?");
            translations.insert("create_account", "खाता बनाउ");
            translations.insert("log_in", "लग इन");
            translations.insert("log_out", "लग आउट");
            translations.insert("send_email", "इमेल पठाउ");
            translations.insert("submit", "जमा करू");
            translations.insert("verify_email", "इमेल प्रमाणित करू");

            // Dashboard
            translations.insert("welcome", "स्वागत अछि");
            translations.insert("create_class", "कक्षा बनाउ");
            translations.insert("class_name", "कक्षाक नाम");
            translations.insert("next", "आगाँ");
            translations.insert("students", "विद्यार्थी सभ");

            // Students
            translations.insert("add_student", "+ विद्यार्थी जोड़ू");
            translations.insert("add_row", "+ पंक्ति जोड़ू");
            translations.insert("add_five_rows", "+ ५ पंक्ति जोड़ू");
            translations.insert("import_csv", "+ CSV आयात करू");
            translations.insert("create_student", "विद्यार्थी बनाउ");
            translations.insert("skip", "छोड़ू");
            translations.insert("search_students", "विद्यार्थी खोजू");
            translations.insert("remove_from_class", "कक्षासँ हटाउ");
            translations.insert("add_to_another_class", "दोसर कक्षामे जोड़ू");
            translations.insert("download_csv", "CSV डाउनलोड करू");
            translations.insert("go_to_class", "कक्षामे जाउ");
            translations.insert("confirm", "पुष्टि करू");
            translations.insert("back", "पाछाँ");
            translations.insert("loading", "लोड भ' रहल अछि...");
        }
        Locale::English => {
            // Account
            translations.insert("login_title", "Log in");
            translations.insert("username_or_email", "Your Email or username");
            translations.insert("password", "Your Password");
            translations.insert("remember_me", "Remember me");
            translations.insert("forgot_password", "Forgot Password?");
            translations.insert("create_account", "Create an account");
            translations.insert("log_in", "Log in");
            translations.insert("log_out", "Log Out");
            translations.insert("send_email", "Send Email");
            translations.insert("submit", "Submit");
            translations.insert("verify_email", "Verify Email");

            // Dashboard
            translations.insert("welcome", "Welcome");
            translations.insert("create_class", "Create class");
            translations.insert("class_name", "Class name");
            translations.insert("next", "Next");
            translations.insert("students", "students");

            // Students
            translations.insert("add_student", "+ add student");
            translations.insert("add_row", "+ add row");
            translations.insert("add_five_rows", "+ add 5 more rows");
            translations.insert("import_csv", "+ import CSV");
            translations.insert("create_student", "Create student");
            translations.insert("skip", "Skip");
            translations.insert("search_students", "Search students");
            translations.insert("remove_from_class", "Remove from class");
            translations.insert("add_to_another_class", "Add to another class");
            translations.insert("download_csv", "Download CSV");
            translations.insert("go_to_class", "Go to class");
            translations.insert("confirm", "Confirm");
            translations.insert("back", "Back");
            translations.insert("loading", "Loading...");
        }
    }

    translations
}

/// Translated string for `key`, or the key itself when no entry exists
pub fn t(key: &str, locale: Locale) -> String {
    let translations = get_translations(locale);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    key.to_string()
}
