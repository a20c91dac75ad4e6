use serde_json::json;

use crate::generator::GeneratedFile;

const NEXT_CONFIG: &str = include_str!("../templates/boilerplate/next.config.js");
const GLOBALS_CSS: &str = include_str!("../templates/boilerplate/globals.css");
const TAILWIND_CONFIG: &str = include_str!("../templates/boilerplate/tailwind.config.js");
const ROOT_LAYOUT: &str = include_str!("../templates/boilerplate/layout.tsx");
const README: &str = include_str!("../templates/boilerplate/README.md");

fn package_json() -> String {
    let manifest = json!({
        "name": "generated-app",
        "version": "0.1.0",
        "private": true,
        "scripts": {
            "dev": "next dev",
            "build": "next build",
            "start": "next start"
        },
        "dependencies": {
            "next": "^16.1.3",
            "react": "^19.2.3",
            "react-dom": "^19.2.3"
        },
        "devDependencies": {
            "@types/node": "^25.0.9",
            "@types/react": "^19.2.8",
            "typescript": "^5.9.3"
        }
    });
    serde_json::to_string_pretty(&manifest).unwrap_or_default()
}

fn tsconfig_json() -> String {
    let config = json!({
        "compilerOptions": {
            "target": "ES2017",
            "lib": ["dom", "dom.iterable", "esnext"],
            "allowJs": true,
            "skipLibCheck": true,
            "strict": true,
            "noEmit": true,
            "esModuleInterop": true,
            "module": "esnext",
            "moduleResolution": "bundler",
            "resolveJsonModule": true,
            "isolatedModules": true,
            "jsx": "preserve",
            "incremental": true,
            "plugins": [{ "name": "next" }],
            "paths": { "@/*": ["./*"] }
        },
        "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx"],
        "exclude": ["node_modules"]
    });
    serde_json::to_string_pretty(&config).unwrap_or_default()
}

/// Tree-independent files placed before the component sources
pub fn leading_files() -> Vec<GeneratedFile> {
    vec![
        GeneratedFile::new("package.json", package_json()),
        GeneratedFile::new("tsconfig.json", tsconfig_json()),
        GeneratedFile::new("next.config.js", NEXT_CONFIG),
        GeneratedFile::new("app/globals.css", GLOBALS_CSS),
        GeneratedFile::new("tailwind.config.js", TAILWIND_CONFIG),
        GeneratedFile::new("app/layout.tsx", ROOT_LAYOUT),
    ]
}

/// Tree-independent files placed after the entry page
pub fn trailing_files() -> Vec<GeneratedFile> {
    vec![GeneratedFile::new("README.md", README)]
}
